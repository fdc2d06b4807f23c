//! Layout constants for reference data sources.
//!
//! An NLSC mirror directory stores the government list responses under the
//! same names as the API endpoints they came from:
//!
//! ```text
//! <root>/ListCounty.xml
//! <root>/ListTown/<county code>.xml
//! <root>/ListLandSection/<county code>/<town code>.xml
//! ```

use std::path::{Path, PathBuf};

/// File holding the county list.
pub const COUNTY_LIST_FILE: &str = "ListCounty.xml";

/// Directory holding one town list per county.
pub const TOWN_LIST_DIR: &str = "ListTown";

/// Directory holding one land-section list per county/town pair.
pub const SECTION_LIST_DIR: &str = "ListLandSection";

/// Extension of every file in a mirror directory.
pub const XML_EXTENSION: &str = "xml";

/// Administrative glyphs that end a town name (鄉, 鎮, 市, 區).
pub const TOWN_SUFFIXES: [char; 4] = ['鄉', '鎮', '市', '區'];

/// Path of the county list inside a mirror directory.
pub fn county_list_path(root: &Path) -> PathBuf {
    root.join(COUNTY_LIST_FILE)
}

/// Path of the town list for one county.
///
/// Returns `None` when the code cannot safely be used as a file name.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use sectcode_reference::config::town_list_path;
///
/// let path = town_list_path(Path::new("nlsc"), "B").unwrap();
/// assert_eq!(path, Path::new("nlsc/ListTown/B.xml"));
/// assert!(town_list_path(Path::new("nlsc"), "../B").is_none());
/// ```
pub fn town_list_path(root: &Path, county_code: &str) -> Option<PathBuf> {
    if !is_code(county_code) {
        return None;
    }
    Some(
        root.join(TOWN_LIST_DIR)
            .join(county_code)
            .with_extension(XML_EXTENSION),
    )
}

/// Path of the land-section list for one town.
///
/// Returns `None` when either code cannot safely be used as a path segment.
pub fn section_list_path(root: &Path, county_code: &str, town_code: &str) -> Option<PathBuf> {
    if !is_code(county_code) || !is_code(town_code) {
        return None;
    }
    Some(
        root.join(SECTION_LIST_DIR)
            .join(county_code)
            .join(town_code)
            .with_extension(XML_EXTENSION),
    )
}

/// Strip the trailing administrative glyph from a town name.
///
/// Names that do not end in one of [`TOWN_SUFFIXES`], or that would become
/// empty, are returned unchanged.
///
/// # Examples
/// ```
/// use sectcode_reference::config::town_stem;
///
/// assert_eq!(town_stem("烏日區"), "烏日");
/// assert_eq!(town_stem("竹北市"), "竹北");
/// assert_eq!(town_stem("區"), "區");
/// ```
pub fn town_stem(name: &str) -> &str {
    match name.char_indices().last() {
        Some((idx, last)) if idx > 0 && TOWN_SUFFIXES.contains(&last) => &name[..idx],
        _ => name,
    }
}

/// A code is usable as a path segment when it is non-empty ASCII alphanumeric.
pub fn is_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric())
}
