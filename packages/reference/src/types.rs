//! Record types for the county / town / land-section hierarchy.
//!
//! The same types serve as the YAML snapshot schema, so a snapshot file is
//! simply a serialized [`Snapshot`].

use serde::{Deserialize, Serialize};

/// A county-level administrative area (縣/市).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyRecord {
    /// Official name, e.g. "臺中市".
    pub name: String,

    /// NLSC county code, e.g. "B".
    pub code: String,

    /// Towns belonging to this county.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub towns: Vec<TownRecord>,
}

/// A town-level administrative area (鄉/鎮/市/區).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownRecord {
    /// Official name including its administrative glyph, e.g. "烏日區".
    pub name: String,

    /// NLSC town code, e.g. "B13".
    pub code: String,

    /// Land sections registered in this town.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionRecord>,
}

/// A cadastral land section (段/小段).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Section name as registered, including its unit, e.g. "北里段".
    pub name: String,

    /// Section code, e.g. "0312".
    pub code: String,
}

/// Complete reference hierarchy, as stored in a YAML snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub counties: Vec<CountyRecord>,
}

impl CountyRecord {
    /// Create a county without towns.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            towns: Vec::new(),
        }
    }

    /// Attach towns to this county.
    #[must_use]
    pub fn with_towns(mut self, towns: Vec<TownRecord>) -> Self {
        self.towns = towns;
        self
    }
}

impl TownRecord {
    /// Create a town without sections.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            sections: Vec::new(),
        }
    }

    /// Attach sections to this town.
    #[must_use]
    pub fn with_sections(mut self, sections: Vec<SectionRecord>) -> Self {
        self.sections = sections;
        self
    }
}

impl SectionRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl Snapshot {
    /// Number of towns across all counties.
    #[must_use]
    pub fn town_count(&self) -> usize {
        self.counties.iter().map(|c| c.towns.len()).sum()
    }

    /// Number of sections across all towns.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.counties
            .iter()
            .flat_map(|c| &c.towns)
            .map(|t| t.sections.len())
            .sum()
    }
}
