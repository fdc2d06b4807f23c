//! Entry points that pick the right loader for a reference location.

use std::path::Path;

use crate::error::{ReferenceError, Result};
use crate::nlsc::load_mirror;
use crate::snapshot::load_snapshot;
use crate::table::NameTable;
use crate::types::Snapshot;

/// Load the reference hierarchy from a path.
///
/// A directory is read as an NLSC mirror, a file as a YAML snapshot.
pub fn load(path: &Path) -> Result<Snapshot> {
    if path.is_dir() {
        load_mirror(path)
    } else if path.is_file() {
        load_snapshot(path)
    } else {
        Err(ReferenceError::InvalidSource {
            path: path.to_path_buf(),
            reason: "no such file or directory".to_string(),
        })
    }
}

/// Load the reference hierarchy from a path and build its name table.
pub fn load_table(path: &Path) -> Result<NameTable> {
    let snapshot = load(path)?;
    Ok(NameTable::from_snapshot(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidSource { .. }));
    }

    #[test]
    fn test_load_empty_directory_requires_county_list() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, ReferenceError::ReadFile { .. }));
    }
}
