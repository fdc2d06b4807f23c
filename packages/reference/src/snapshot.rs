//! YAML snapshot files.
//!
//! A snapshot stores the whole county -> town -> section hierarchy in one
//! file, so a converter can start without a mirror directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{ReferenceError, Result};
use crate::types::Snapshot;

/// Parse snapshot YAML text.
pub fn parse_snapshot(yaml: &str) -> Result<Snapshot> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Render a snapshot as YAML text.
pub fn generate_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_yaml_ng::to_string(snapshot)?)
}

/// Load a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let yaml = fs::read_to_string(path).map_err(|source| ReferenceError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = parse_snapshot(&yaml)?;
    tracing::info!(
        counties = snapshot.counties.len(),
        towns = snapshot.town_count(),
        sections = snapshot.section_count(),
        path = %path.display(),
        "Loaded reference snapshot"
    );
    Ok(snapshot)
}

/// Write a snapshot file.
///
/// The content is written to a temporary sibling first and renamed into
/// place, so readers never observe a partial file.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let content = generate_snapshot(snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| ReferenceError::InvalidSource {
            path: path.to_path_buf(),
            reason: "snapshot path has no file name".to_string(),
        })?
        .to_string_lossy();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CountyRecord, SectionRecord, TownRecord};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SNAPSHOT_YAML: &str = r#"
counties:
  - name: 臺中市
    code: "B"
    towns:
      - name: 烏日區
        code: "B13"
        sections:
          - name: 北里段
            code: "0312"
  - name: 新竹縣
    code: "J"
"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = parse_snapshot(SNAPSHOT_YAML).unwrap();
        assert_eq!(
            snapshot,
            Snapshot {
                counties: vec![
                    CountyRecord::new("臺中市", "B").with_towns(vec![TownRecord::new(
                        "烏日區", "B13"
                    )
                    .with_sections(vec![SectionRecord::new("北里段", "0312")])]),
                    CountyRecord::new("新竹縣", "J"),
                ]
            }
        );
    }

    #[test]
    fn test_section_code_keeps_leading_zero() {
        let snapshot = parse_snapshot(SNAPSHOT_YAML).unwrap();
        let yaml = generate_snapshot(&snapshot).unwrap();
        let reparsed = parse_snapshot(&yaml).unwrap();
        assert_eq!(reparsed.counties[0].towns[0].sections[0].code, "0312");
    }

    #[test]
    fn test_save_and_load_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("reference.yaml");
        let snapshot = parse_snapshot(SNAPSHOT_YAML).unwrap();

        save_snapshot(&snapshot, &path).unwrap();

        assert!(path.is_file());
        assert!(!dir.path().join("nested").join(".reference.yaml.tmp").exists());
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_load_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let err = load_snapshot(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ReferenceError::ReadFile { .. }));
    }

    #[test]
    fn test_parse_invalid_snapshot() {
        assert!(matches!(
            parse_snapshot("counties: 12"),
            Err(ReferenceError::Yaml(_))
        ));
    }
}
