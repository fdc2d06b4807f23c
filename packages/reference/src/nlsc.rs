//! Parsing of NLSC list responses and mirror directories.
//!
//! The land administration API answers `ListCounty`, `ListTown/{county}` and
//! `ListLandSection/{county}/{town}` with flat XML lists: every child of the
//! root element is one item, and every child of an item is one field.
//!
//! ```xml
//! <countyItems>
//!   <countyItem>
//!     <countycode>B</countycode>
//!     <countyname>臺中市</countyname>
//!   </countyItem>
//! </countyItems>
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use roxmltree::Document;

use crate::config::{county_list_path, section_list_path, town_list_path};
use crate::error::{ReferenceError, Result};
use crate::types::{CountyRecord, SectionRecord, Snapshot, TownRecord};
use crate::xml::{element_children, get_tag_name, item_fields};

/// Field names of one NLSC list kind.
struct ListFields {
    name: &'static str,
    code: &'static str,
}

const COUNTY_FIELDS: ListFields = ListFields {
    name: "countyname",
    code: "countycode",
};

const TOWN_FIELDS: ListFields = ListFields {
    name: "townname",
    code: "towncode",
};

const SECTION_FIELDS: ListFields = ListFields {
    name: "sectstr",
    code: "sectcode",
};

/// Parse a `ListCounty` response.
pub fn parse_county_list(xml: &str) -> Result<Vec<CountyRecord>> {
    let doc = Document::parse(xml)?;
    Ok(parse_items(&doc, &COUNTY_FIELDS)?
        .into_iter()
        .map(|(name, code)| CountyRecord::new(name, code))
        .collect())
}

/// Parse a `ListTown/{county}` response.
pub fn parse_town_list(xml: &str) -> Result<Vec<TownRecord>> {
    let doc = Document::parse(xml)?;
    Ok(parse_items(&doc, &TOWN_FIELDS)?
        .into_iter()
        .map(|(name, code)| TownRecord::new(name, code))
        .collect())
}

/// Parse a `ListLandSection/{county}/{town}` response.
pub fn parse_section_list(xml: &str) -> Result<Vec<SectionRecord>> {
    let doc = Document::parse(xml)?;
    Ok(parse_items(&doc, &SECTION_FIELDS)?
        .into_iter()
        .map(|(name, code)| SectionRecord::new(name, code))
        .collect())
}

/// Extract (name, code) pairs from every item of a list document.
fn parse_items(doc: &Document<'_>, fields: &ListFields) -> Result<Vec<(String, String)>> {
    let mut items = Vec::new();

    for (index, item) in element_children(doc.root_element()).enumerate() {
        let mut values = item_fields(item);
        let context = format!("{} #{}", get_tag_name(item), index + 1);

        let name = take_required(&mut values, fields.name, &context)?;
        let code = take_required(&mut values, fields.code, &context)?;
        items.push((name, code));
    }

    Ok(items)
}

fn take_required(
    values: &mut HashMap<&str, String>,
    element: &str,
    context: &str,
) -> Result<String> {
    values
        .remove(element)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReferenceError::MissingElement {
            element: element.to_string(),
            context: context.to_string(),
        })
}

/// Load a complete hierarchy from an NLSC mirror directory.
///
/// The county list is required. A county without a town list, or a town
/// without a section list, is kept with no children.
pub fn load_mirror(root: &Path) -> Result<Snapshot> {
    let county_xml = read_xml(&county_list_path(root))?;
    let mut counties = parse_county_list(&county_xml)?;

    for county in &mut counties {
        let Some(town_path) = town_list_path(root, &county.code) else {
            tracing::warn!(code = %county.code, "County code is not usable as a file name, skipping towns");
            continue;
        };
        if !town_path.is_file() {
            tracing::warn!(county = %county.name, path = %town_path.display(), "No town list in mirror");
            continue;
        }
        county.towns = parse_town_list(&read_xml(&town_path)?)?;

        for town in &mut county.towns {
            let Some(section_path) = section_list_path(root, &county.code, &town.code) else {
                tracing::warn!(code = %town.code, "Town code is not usable as a file name, skipping sections");
                continue;
            };
            if !section_path.is_file() {
                tracing::debug!(town = %town.name, path = %section_path.display(), "No section list in mirror");
                continue;
            }
            town.sections = parse_section_list(&read_xml(&section_path)?)?;
        }
    }

    let snapshot = Snapshot { counties };
    tracing::info!(
        counties = snapshot.counties.len(),
        towns = snapshot.town_count(),
        sections = snapshot.section_count(),
        root = %root.display(),
        "Loaded NLSC mirror"
    );
    Ok(snapshot)
}

fn read_xml(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ReferenceError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const COUNTY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<countyItems>
  <countyItem>
    <countycode>B</countycode>
    <countyname>臺中市</countyname>
    <countycode01>66000</countycode01>
  </countyItem>
  <countyItem>
    <countycode>J</countycode>
    <countyname>新竹縣</countyname>
  </countyItem>
</countyItems>"#;

    #[test]
    fn test_parse_county_list() {
        let counties = parse_county_list(COUNTY_XML).unwrap();
        assert_eq!(
            counties,
            vec![
                CountyRecord::new("臺中市", "B"),
                CountyRecord::new("新竹縣", "J"),
            ]
        );
    }

    #[test]
    fn test_parse_town_list() {
        let xml = r#"<townItems>
  <townItem><towncode>B13</towncode><townname>烏日區</townname></townItem>
</townItems>"#;
        let towns = parse_town_list(xml).unwrap();
        assert_eq!(towns, vec![TownRecord::new("烏日區", "B13")]);
    }

    #[test]
    fn test_parse_section_list_ignores_extra_fields() {
        let xml = r#"<sectItems>
  <sectItem><office>BA</office><sectcode>0312</sectcode><sectstr>北里段</sectstr></sectItem>
</sectItems>"#;
        let sections = parse_section_list(xml).unwrap();
        assert_eq!(sections, vec![SectionRecord::new("北里段", "0312")]);
    }

    #[test]
    fn test_missing_field_reports_item() {
        let xml = r#"<townItems>
  <townItem><towncode>B13</towncode><townname>烏日區</townname></townItem>
  <townItem><towncode>B12</towncode></townItem>
</townItems>"#;
        let err = parse_town_list(xml).unwrap_err();
        match err {
            ReferenceError::MissingElement { element, context } => {
                assert_eq!(element, "townname");
                assert_eq!(context, "townItem #2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let xml = r#"<countyItems><countyItem><countycode> </countycode><countyname>臺中市</countyname></countyItem></countyItems>"#;
        assert!(matches!(
            parse_county_list(xml),
            Err(ReferenceError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse_county_list("<countyItems>"),
            Err(ReferenceError::XmlParse(_))
        ));
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_county_list("<countyItems/>").unwrap().is_empty());
    }
}
