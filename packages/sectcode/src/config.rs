//! Vocabularies, constants and runtime configuration for address conversion.

use std::path::PathBuf;

use crate::error::{Result, SectCodeError};

/// Section unit suffixes, in match-preference order.
pub const SECTION_UNITS: &[&str] = &["地段", "小段", "區段", "鎮段", "段"];

/// Parcel unit suffixes, in match-preference order.
pub const PARCEL_UNITS: &[&str] = &["地號", "號"];

/// Units recognised by unit segmentation, in match-preference order.
pub const SEGMENT_UNITS: &[&str] = &[
    "地號", "地段", "小段", "區段", "鎮段", "鎮區", "市區", "縣", "市", "鄉", "鎮", "村", "里", "區",
    "段", "號",
];

/// Separator between independent parcel numbers ("254-43、254-46").
pub const LIST_SEPARATOR: char = '、';

/// Marker of an inclusive parcel range ("956至960").
pub const RANGE_MARKER: char = '至';

/// Separator between main lot and sub lot ("120-6").
pub const LOT_SEPARATOR: char = '-';

/// Width of each half of a parcel code.
pub const PARCEL_PART_WIDTH: usize = 4;

/// Largest main or sub lot number that fits [`PARCEL_PART_WIDTH`].
pub const MAX_PARCEL_PART: u32 = 9999;

/// Environment variable naming the reference data location.
pub const REFERENCE_ENV: &str = "SECTCODE_REFERENCE";

/// Environment variable selecting [`TaiHandling`].
pub const TAI_HANDLING_ENV: &str = "SECTCODE_TAI_HANDLING";

/// Environment variable toggling county-scoped town lookup.
pub const SCOPE_TOWNS_ENV: &str = "SECTCODE_SCOPE_TOWNS";

/// How the normalizer treats the character variant 台.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaiHandling {
    /// Replace 台 with its registry form 臺.
    #[default]
    Canonical,

    /// Remove 台 entirely.
    Delete,
}

impl TaiHandling {
    /// Parse the value of [`TAI_HANDLING_ENV`].
    ///
    /// # Examples
    /// ```
    /// use sectcode::config::TaiHandling;
    ///
    /// assert_eq!(TaiHandling::parse("delete").unwrap(), TaiHandling::Delete);
    /// assert!(TaiHandling::parse("keep").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "delete" => Ok(Self::Delete),
            other => Err(SectCodeError::Config(format!(
                "{TAI_HANDLING_ENV} must be 'canonical' or 'delete', got '{other}'"
            ))),
        }
    }
}

/// Runtime configuration for [`crate::SectCodeConverter`].
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Treatment of the 台 variant during normalization.
    pub tai: TaiHandling,

    /// Look a town up within its county first when the county is known.
    pub scope_towns_by_county: bool,

    /// Reference data location (snapshot file or NLSC mirror directory).
    pub reference: Option<PathBuf>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            tai: TaiHandling::Canonical,
            scope_towns_by_county: true,
            reference: None,
        }
    }
}

impl ConverterConfig {
    /// Read configuration from the environment, using defaults for unset values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = get(TAI_HANDLING_ENV) {
            config.tai = TaiHandling::parse(&value)?;
        }

        if let Some(value) = get(SCOPE_TOWNS_ENV) {
            config.scope_towns_by_county = parse_bool(SCOPE_TOWNS_ENV, &value)?;
        }

        config.reference = get(REFERENCE_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn with_tai(mut self, tai: TaiHandling) -> Self {
        self.tai = tai;
        self
    }

    pub fn with_scope_towns_by_county(mut self, scope: bool) -> Self {
        self.scope_towns_by_county = scope;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<PathBuf>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(SectCodeError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
