//! Reference name tables for Taiwanese cadastral codes.
//!
//! This crate provides the county / town / land-section lookups that the
//! address converter resolves names against, plus loaders for the formats
//! the tables are distributed in.
//!
//! # Example
//!
//! ```
//! use sectcode_reference::{NameTable, ReferenceLookup};
//!
//! let mut builder = NameTable::builder();
//! builder
//!     .add_county("臺中市", "B")
//!     .add_town("B", "烏日區", "B13")
//!     .add_section("B", "B13", "北里段", "0312");
//! let table = builder.build();
//!
//! assert_eq!(table.lookup_town_code("烏日區"), Some("B13"));
//! assert_eq!(table.lookup_county_code_by_town_code("B13"), Some("B"));
//! ```
//!
//! # Architecture
//!
//! - [`lookup`]: The [`ReferenceLookup`] trait consumed by the converter
//! - [`table`]: Immutable [`NameTable`] implementation and its builder
//! - [`types`]: Record types, doubling as the YAML snapshot schema
//! - [`nlsc`]: NLSC list XML parsing and mirror directories
//! - [`snapshot`]: YAML snapshot files
//! - [`loader`]: Load from whichever source a path points at
//! - [`xml`]: XML utilities
//! - [`config`]: File layout constants
//! - [`error`]: Error types and Result alias

pub mod config;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod nlsc;
pub mod snapshot;
pub mod table;
pub mod types;
pub mod xml;

pub use error::{ReferenceError, Result};
pub use loader::{load, load_table};
pub use lookup::ReferenceLookup;
pub use snapshot::save_snapshot;
pub use table::{NameTable, NameTableBuilder};
pub use types::{CountyRecord, SectionRecord, Snapshot, TownRecord};
