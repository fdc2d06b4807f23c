//! Resolution of address tokens to registry codes.
//!
//! # Resolution order
//!
//! 1. County code from the county name.
//! 2. Town code from the town name, looked up within the county first when
//!    the county is known and scoping is enabled, then nationwide.
//! 3. When only the town resolved, the county code is taken from the town.
//! 4. Without both a county and a town code the address is unresolved.
//! 5. Section code within that town. An unknown section leaves the section
//!    code empty.
//! 6. Parcel codes from the parcel designator. Malformed parcel tokens are
//!    kept as warnings.

use std::sync::Arc;

use serde::Serialize;

use sectcode_reference::ReferenceLookup;

use crate::error::{MalformedParcelToken, Result, SectCodeError};
use crate::parcel::{parse_parcel, ParcelCode};
use crate::tokenizer::AddressToken;

/// Fully resolved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectCode {
    pub county_code: String,
    pub town_code: String,
    /// Empty when the section is not registered for the town.
    pub section_code: String,
    pub parcel_codes: Vec<ParcelCode>,
    /// Parcel tokens skipped while parsing, in input order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<MalformedParcelToken>,
}

impl SectCode {
    /// Parcel codes as `MMMMSSSS` strings.
    pub fn parcel_code_strings(&self) -> Vec<String> {
        self.parcel_codes.iter().map(ToString::to_string).collect()
    }
}

/// Resolves [`AddressToken`]s against a shared reference lookup.
#[derive(Clone)]
pub struct CodeResolver {
    lookup: Arc<dyn ReferenceLookup>,
    scope_towns_by_county: bool,
}

impl CodeResolver {
    pub fn new(lookup: Arc<dyn ReferenceLookup>) -> Self {
        Self {
            lookup,
            scope_towns_by_county: true,
        }
    }

    /// Enable or disable county-scoped town lookup.
    pub fn with_scope_towns_by_county(mut self, scope: bool) -> Self {
        self.scope_towns_by_county = scope;
        self
    }

    /// Resolve a token; `address` is the normalized text it came from and
    /// only appears in the error.
    pub fn resolve(&self, token: &AddressToken, address: &str) -> Result<SectCode> {
        let lookup = self.lookup.as_ref();

        let mut county_code = non_empty(&token.county).and_then(|c| lookup.lookup_county_code(c));
        let town_code = non_empty(&token.town).and_then(|town| self.town_code(county_code, town));

        if county_code.is_none() {
            if let Some(town) = town_code {
                county_code = lookup.lookup_county_code_by_town_code(town);
                tracing::debug!(town_code = town, county_code = ?county_code, "county taken from town");
            }
        }

        let (Some(county_code), Some(town_code)) = (county_code, town_code) else {
            return Err(SectCodeError::UnresolvedAddress {
                address: address.to_string(),
                county: token.county.clone(),
                town: token.town.clone(),
            });
        };

        let section_code = non_empty(&token.section)
            .and_then(|section| lookup.lookup_section_code(county_code, town_code, section))
            .unwrap_or_default();
        if section_code.is_empty() && !token.section.is_empty() {
            tracing::debug!(section = %token.section, town_code, "section not registered");
        }

        let parcel = parse_parcel(&token.parcel.value);

        Ok(SectCode {
            county_code: county_code.to_string(),
            town_code: town_code.to_string(),
            section_code: section_code.to_string(),
            parcel_codes: parcel.codes,
            warnings: parcel.skipped,
        })
    }

    fn town_code<'a>(&'a self, county_code: Option<&str>, town: &str) -> Option<&'a str> {
        let lookup = self.lookup.as_ref();
        match county_code {
            Some(county) if self.scope_towns_by_county => lookup
                .lookup_town_code_in_county(county, town)
                .or_else(|| lookup.lookup_town_code(town)),
            Some(_) => lookup.lookup_town_code(town),
            None => {
                if lookup.is_ambiguous_town(town) {
                    tracing::warn!(town = %town, "Town name exists in several counties; no county given");
                }
                lookup.lookup_town_code(town)
            }
        }
    }
}

impl std::fmt::Debug for CodeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeResolver")
            .field("scope_towns_by_county", &self.scope_towns_by_county)
            .finish_non_exhaustive()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
