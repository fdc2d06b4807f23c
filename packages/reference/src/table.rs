//! Immutable in-memory name tables.

use std::collections::{HashMap, HashSet};

use crate::config::town_stem;
use crate::lookup::ReferenceLookup;
use crate::types::Snapshot;

/// Section name -> section code for one town.
type SectionTable = HashMap<String, String>;

/// Immutable name tables for the county / town / land-section hierarchy.
///
/// Built once through [`NameTableBuilder`] (or [`NameTable::from_snapshot`])
/// and read-only afterwards.
///
/// A town name registered under several counties resolves globally to its
/// first registration; [`ReferenceLookup::lookup_town_code_in_county`]
/// keeps every registration reachable.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    county_names: Vec<String>,
    county_codes: HashMap<String, String>,
    town_names: Vec<String>,
    town_codes: HashMap<String, String>,
    scoped_town_codes: HashMap<(String, String), String>,
    ambiguous_towns: HashSet<String>,
    town_to_county: HashMap<String, String>,
    sections: HashMap<(String, String), SectionTable>,
}

impl NameTable {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> NameTableBuilder {
        NameTableBuilder::default()
    }

    /// Build a table from a loaded snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut builder = Self::builder();
        for county in &snapshot.counties {
            builder.add_county(&county.name, &county.code);
            for town in &county.towns {
                builder.add_town(&county.code, &town.name, &town.code);
                for section in &town.sections {
                    builder.add_section(&county.code, &town.code, &section.name, &section.code);
                }
            }
        }
        builder.build()
    }

    /// Number of distinct county names.
    #[must_use]
    pub fn county_count(&self) -> usize {
        self.county_names.len()
    }

    /// Number of distinct town names.
    #[must_use]
    pub fn town_count(&self) -> usize {
        self.town_names.len()
    }

    /// Number of registered sections across all towns.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.values().map(HashMap::len).sum()
    }

    /// Town names without their trailing administrative glyph.
    ///
    /// Deduplicated, in registration order. Used to seed unit segmentation
    /// so that stems containing unit glyphs (e.g. "大里") stay whole.
    #[must_use]
    pub fn town_name_stems(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.town_names
            .iter()
            .map(|name| town_stem(name))
            .filter(|stem| seen.insert(*stem))
            .map(str::to_string)
            .collect()
    }
}

impl ReferenceLookup for NameTable {
    fn lookup_county_code(&self, name: &str) -> Option<&str> {
        self.county_codes.get(name).map(String::as_str)
    }

    fn lookup_town_code(&self, name: &str) -> Option<&str> {
        self.town_codes.get(name).map(String::as_str)
    }

    fn lookup_county_code_by_town_code(&self, town_code: &str) -> Option<&str> {
        self.town_to_county.get(town_code).map(String::as_str)
    }

    fn lookup_section_code(
        &self,
        county_code: &str,
        town_code: &str,
        section_name: &str,
    ) -> Option<&str> {
        self.sections
            .get(&(county_code.to_string(), town_code.to_string()))
            .and_then(|table| table.get(section_name))
            .map(String::as_str)
    }

    fn all_county_names(&self) -> Vec<String> {
        self.county_names.clone()
    }

    fn all_town_names(&self) -> Vec<String> {
        self.town_names.clone()
    }

    fn lookup_town_code_in_county(&self, county_code: &str, name: &str) -> Option<&str> {
        self.scoped_town_codes
            .get(&(county_code.to_string(), name.to_string()))
            .map(String::as_str)
    }

    fn is_ambiguous_town(&self, name: &str) -> bool {
        self.ambiguous_towns.contains(name)
    }
}

/// Accumulates registrations for a [`NameTable`].
///
/// Empty names or codes are ignored. Re-registering a county name keeps the
/// first code.
#[derive(Debug, Default)]
pub struct NameTableBuilder {
    table: NameTable,
}

impl NameTableBuilder {
    /// Register a county.
    pub fn add_county(&mut self, name: &str, code: &str) -> &mut Self {
        if name.is_empty() || code.is_empty() {
            return self;
        }
        if !self.table.county_codes.contains_key(name) {
            self.table.county_names.push(name.to_string());
            self.table
                .county_codes
                .insert(name.to_string(), code.to_string());
        }
        self
    }

    /// Register a town under its owning county code.
    pub fn add_town(&mut self, county_code: &str, name: &str, code: &str) -> &mut Self {
        if name.is_empty() || code.is_empty() {
            return self;
        }
        let table = &mut self.table;

        match table.town_codes.get(name) {
            None => {
                table.town_names.push(name.to_string());
                table.town_codes.insert(name.to_string(), code.to_string());
            }
            Some(existing) if existing != code => {
                table.ambiguous_towns.insert(name.to_string());
            }
            Some(_) => {}
        }

        table
            .scoped_town_codes
            .entry((county_code.to_string(), name.to_string()))
            .or_insert_with(|| code.to_string());

        if !county_code.is_empty() {
            table
                .town_to_county
                .entry(code.to_string())
                .or_insert_with(|| county_code.to_string());
        }
        self
    }

    /// Register a land section within a town.
    pub fn add_section(
        &mut self,
        county_code: &str,
        town_code: &str,
        name: &str,
        code: &str,
    ) -> &mut Self {
        if name.is_empty() || code.is_empty() {
            return self;
        }
        self.table
            .sections
            .entry((county_code.to_string(), town_code.to_string()))
            .or_default()
            .entry(name.to_string())
            .or_insert_with(|| code.to_string());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(&mut self) -> NameTable {
        std::mem::take(&mut self.table)
    }
}
