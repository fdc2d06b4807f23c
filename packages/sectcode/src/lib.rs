//! Taiwanese cadastral address conversion.
//!
//! This crate turns free-form land addresses such as `烏日區北里段277地號`
//! into registry codes: county, town, land section and fixed-width parcel
//! codes.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sectcode::{ConverterConfig, SectCodeConverter};
//! use sectcode_reference::NameTable;
//!
//! let mut builder = NameTable::builder();
//! builder
//!     .add_county("雲林縣", "P")
//!     .add_town("P", "口湖鄉", "P12")
//!     .add_section("P", "P12", "梧北段", "0702");
//!
//! let converter =
//!     SectCodeConverter::new(Arc::new(builder.build()), &ConverterConfig::default()).unwrap();
//! let code = converter
//!     .convert_address("雲林縣口湖鄉梧北段二五四之四十三、二五四之四十六地號")
//!     .unwrap();
//!
//! assert_eq!(code.town_code, "P12");
//! assert_eq!(code.parcel_code_strings(), ["02540043", "02540046"]);
//! ```
//!
//! # Architecture
//!
//! - [`normalizer`]: Canonicalize raw text (digits, numerals, punctuation)
//! - [`tokenizer`]: Extract county, town, section and parcel fields
//! - [`parcel`]: Parse parcel numbers into `MMMMSSSS` codes
//! - [`resolver`]: Resolve fields to codes through a [`ReferenceLookup`]
//! - [`converter`]: The [`SectCodeConverter::convert_address`] entry point
//! - [`segment`]: Unit segmentation and splitting of multi-address text
//! - [`cli`]: Command-line interface
//! - [`config`]: Vocabularies, constants and runtime configuration
//! - [`error`]: Error types and Result alias
//!
//! [`ReferenceLookup`]: sectcode_reference::ReferenceLookup

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod normalizer;
pub mod parcel;
pub mod resolver;
pub mod segment;
pub mod tokenizer;

pub use config::{ConverterConfig, TaiHandling};
pub use converter::SectCodeConverter;
pub use error::{MalformedParcelToken, MalformedReason, Result, SectCodeError};
pub use normalizer::{normalize, Normalizer};
pub use parcel::{parse_parcel, ParcelCode, ParcelParse};
pub use resolver::{CodeResolver, SectCode};
pub use segment::{LandFields, Segments, UnitLevel, UnitSegmenter, UnitToken};
pub use tokenizer::{AddressField, AddressToken, FieldSpan, ParcelDesignator, Tokenizer};
