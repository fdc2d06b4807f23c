//! The `convert_address` entry point.

use std::path::Path;
use std::sync::Arc;

use sectcode_reference::{load_table, ReferenceLookup};

use crate::config::ConverterConfig;
use crate::error::{Result, SectCodeError};
use crate::normalizer::Normalizer;
use crate::resolver::{CodeResolver, SectCode};
use crate::tokenizer::{AddressToken, Tokenizer};

/// Converts raw cadastral addresses to registry codes.
///
/// Composes normalization, tokenization, and resolution. The reference
/// lookup is shared and never mutated, so one converter can serve many
/// threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sectcode::{ConverterConfig, SectCodeConverter};
/// use sectcode_reference::NameTable;
///
/// let mut builder = NameTable::builder();
/// builder
///     .add_county("臺中市", "B")
///     .add_town("B", "烏日區", "B13")
///     .add_section("B", "B13", "北里段", "0312");
/// let table = Arc::new(builder.build());
///
/// let converter = SectCodeConverter::new(table, &ConverterConfig::default()).unwrap();
/// let code = converter.convert_address("烏日區北里段２７７地號").unwrap();
/// assert_eq!(code.county_code, "B");
/// assert_eq!(code.section_code, "0312");
/// assert_eq!(code.parcel_code_strings(), ["02770000"]);
/// ```
#[derive(Debug, Clone)]
pub struct SectCodeConverter {
    normalizer: Normalizer,
    tokenizer: Tokenizer,
    resolver: CodeResolver,
}

impl SectCodeConverter {
    /// Build a converter over an already loaded lookup.
    pub fn new(lookup: Arc<dyn ReferenceLookup>, config: &ConverterConfig) -> Result<Self> {
        let tokenizer = Tokenizer::from_lookup(lookup.as_ref())?;
        let resolver =
            CodeResolver::new(lookup).with_scope_towns_by_county(config.scope_towns_by_county);
        Ok(Self {
            normalizer: Normalizer::new(config.tai),
            tokenizer,
            resolver,
        })
    }

    /// Load the reference tables at `path` and build a converter.
    pub fn from_path(path: &Path, config: &ConverterConfig) -> Result<Self> {
        let table = load_table(path)?;
        Self::new(Arc::new(table), config)
    }

    /// Build a converter from `config.reference`.
    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        let path = config.reference.as_deref().ok_or_else(|| {
            SectCodeError::Config("no reference data location configured".to_string())
        })?;
        Self::from_path(path, config)
    }

    /// Normalize, tokenize and resolve one address.
    pub fn convert_address(&self, raw: &str) -> Result<SectCode> {
        let normalized = self.normalize(raw);
        let token = self.tokenizer.tokenize(&normalized);
        self.resolver.resolve(&token, &normalized)
    }

    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    /// Normalize and tokenize without resolving.
    pub fn tokenize(&self, raw: &str) -> AddressToken {
        self.tokenizer.tokenize(&self.normalize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaiHandling;
    use pretty_assertions::assert_eq;
    use sectcode_reference::NameTable;

    fn converter(config: &ConverterConfig) -> SectCodeConverter {
        let mut builder = NameTable::builder();
        builder
            .add_county("臺中市", "B")
            .add_town("B", "烏日區", "B13")
            .add_town("B", "中區", "B01")
            .add_section("B", "B13", "北里段", "0312");
        SectCodeConverter::new(Arc::new(builder.build()), config).unwrap()
    }

    #[test]
    fn test_convert_address() {
        let code = converter(&ConverterConfig::default())
            .convert_address("台中市烏日區北里段二七七地號")
            .unwrap();
        assert_eq!(code.county_code, "B");
        assert_eq!(code.town_code, "B13");
        assert_eq!(code.section_code, "0312");
        assert_eq!(code.parcel_code_strings(), vec!["02770000"]);
    }

    #[test]
    fn test_unresolved_address_carries_normalized_text() {
        let err = converter(&ConverterConfig::default())
            .convert_address("某 處")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "某處: county code for '' or town code for '' not found"
        );
    }

    #[test]
    fn test_tai_delete_changes_county_match() {
        let config = ConverterConfig::default().with_tai(TaiHandling::Delete);
        let converter = converter(&config);
        let token = converter.tokenize("台中市中區");
        assert_eq!(token.county, "");
        assert_eq!(token.town, "中區");
    }

    #[test]
    fn test_from_config_requires_reference() {
        let err = SectCodeConverter::from_config(&ConverterConfig::default()).unwrap_err();
        assert!(matches!(err, SectCodeError::Config(_)));
    }

    #[test]
    fn test_converter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SectCodeConverter>();
    }
}
