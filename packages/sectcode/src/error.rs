//! Error types for address conversion.
//!
//! `SectCodeError` covers failures that abort a conversion (or a command).
//! A parcel token that cannot be parsed never aborts a conversion; it is
//! reported as a [`MalformedParcelToken`] next to the codes that did parse.

use serde::Serialize;
use thiserror::Error;

use sectcode_reference::ReferenceError;

/// Main error type for the sectcode library.
#[derive(Debug, Error)]
pub enum SectCodeError {
    /// County or town could not be determined, even through the town code.
    #[error("{address}: county code for '{county}' or town code for '{town}' not found")]
    UnresolvedAddress {
        /// The normalized address.
        address: String,
        /// County name extracted by the tokenizer (may be empty).
        county: String,
        /// Town name extracted by the tokenizer (may be empty).
        town: String,
    },

    /// Some addresses of a batch could not be resolved.
    #[error("{unresolved} of {total} addresses could not be resolved")]
    BatchUnresolved { unresolved: usize, total: usize },

    /// Loading the reference tables failed.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The name vocabulary could not be compiled into a matcher.
    #[error("Failed to build name matcher: {0}")]
    Vocabulary(#[from] aho_corasick::BuildError),

    /// A generated pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sectcode operations.
pub type Result<T> = std::result::Result<T, SectCodeError>;

/// Why a parcel token was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MalformedReason {
    /// Splitting on the lot separator gave neither one nor two parts.
    #[error("expected 1 or 2 lot parts, found {0}")]
    SegmentCount(usize),

    /// A part is not a plain base-10 number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// A number does not fit the four-digit code field, or a main lot is 0.
    #[error("{0} is not a valid lot number")]
    OutOfRange(u64),

    /// A range does not have exactly one start and one end.
    #[error("range must have exactly one start and one end")]
    BadRange,

    /// A range whose start is above its end.
    #[error("range start {start} is above range end {end}")]
    ReversedRange { start: u32, end: u32 },
}

/// A parcel token that was skipped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("Invalid land number '{token}': {reason}")]
pub struct MalformedParcelToken {
    /// The token as it appeared between list separators.
    pub token: String,

    /// What was wrong with it.
    pub reason: MalformedReason,
}

impl MalformedParcelToken {
    #[must_use]
    pub fn new(token: impl Into<String>, reason: MalformedReason) -> Self {
        Self {
            token: token.into(),
            reason,
        }
    }
}
