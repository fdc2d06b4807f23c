//! Unit segmentation of address text.
//!
//! Splits text into `(value, unit)` pairs on the administrative and
//! cadastral unit glyphs (縣, 區, 段, 地號, ...). Unlike the
//! [`Tokenizer`](crate::Tokenizer) this needs no name tables: known town
//! stems only keep names that contain a unit glyph (大里, 北里) in one
//! piece. Segments are used to split a string holding several addresses.

use regex::Regex;
use serde::Serialize;

use crate::config::SEGMENT_UNITS;
use crate::error::Result;

/// Depth of a unit in the hierarchy, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitLevel {
    County,
    Town,
    Village,
    Section,
    SmallSection,
    Number,
}

impl UnitLevel {
    pub const ALL: [UnitLevel; 6] = [
        Self::County,
        Self::Town,
        Self::Village,
        Self::Section,
        Self::SmallSection,
        Self::Number,
    ];

    /// Unit glyphs belonging to this level.
    pub fn units(self) -> &'static [&'static str] {
        match self {
            Self::County => &["縣", "市"],
            Self::Town => &["鄉", "鎮", "區", "市區", "鎮區"],
            Self::Village => &["村", "里"],
            Self::Section => &["段", "地段", "區段", "鎮段"],
            Self::SmallSection => &["小段"],
            Self::Number => &["號", "地號"],
        }
    }

    /// The first level listing `unit`.
    pub fn of(unit: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.units().contains(&unit))
    }
}

/// One `(value, unit)` pair, e.g. ("烏日", "區").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitToken {
    pub value: String,
    pub unit: String,
}

impl UnitToken {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }

    pub fn level(&self) -> UnitLevel {
        UnitLevel::of(&self.unit).unwrap_or(UnitLevel::County)
    }

    /// Value and unit joined back together.
    pub fn text(&self) -> String {
        format!("{}{}", self.value, self.unit)
    }
}

/// The first token of each level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LandFields {
    pub county: Option<UnitToken>,
    pub town: Option<UnitToken>,
    pub village: Option<UnitToken>,
    pub section: Option<UnitToken>,
    pub small_section: Option<UnitToken>,
    pub number: Option<UnitToken>,
}

/// Segmentation of one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segments {
    pub tokens: Vec<UnitToken>,
}

impl Segments {
    pub fn fields(&self) -> LandFields {
        let first = |level: UnitLevel| self.tokens.iter().find(|t| t.level() == level).cloned();
        LandFields {
            county: first(UnitLevel::County),
            town: first(UnitLevel::Town),
            village: first(UnitLevel::Village),
            section: first(UnitLevel::Section),
            small_section: first(UnitLevel::SmallSection),
            number: first(UnitLevel::Number),
        }
    }

    /// Split into single addresses.
    ///
    /// A new address starts wherever the hierarchy goes back up: after a
    /// token whose level is deeper than the level of the token following it.
    pub fn split_addresses(&self) -> Vec<String> {
        let mut addresses = Vec::new();
        let mut current = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            current.push_str(&token.value);
            current.push_str(&token.unit);
            let cut = match self.tokens.get(i + 1) {
                Some(next) => token.level() > next.level(),
                None => true,
            };
            if cut {
                addresses.push(std::mem::take(&mut current));
            }
        }
        addresses
    }
}

/// Splits text into unit tokens.
#[derive(Debug, Clone)]
pub struct UnitSegmenter {
    pattern: Regex,
}

impl UnitSegmenter {
    /// Build a segmenter that keeps the given town stems whole.
    ///
    /// # Examples
    /// ```
    /// use sectcode::UnitSegmenter;
    ///
    /// let segmenter = UnitSegmenter::new(&["大里"]).unwrap();
    /// let segments = segmenter.segment("大里區大里段1064地號");
    /// assert_eq!(segments.tokens.len(), 3);
    /// assert_eq!(segments.tokens[0].value, "大里");
    /// ```
    pub fn new<S: AsRef<str>>(town_stems: &[S]) -> Result<Self> {
        let mut values: Vec<String> = town_stems
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .map(regex::escape)
            .collect();
        values.push(".+?".to_string());
        let source = format!(
            "(?P<value>{})(?P<unit>{})",
            values.join("|"),
            SEGMENT_UNITS.join("|")
        );
        Ok(Self {
            pattern: Regex::new(&source)?,
        })
    }

    /// Source text of the segmentation pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn segment(&self, text: &str) -> Segments {
        let tokens = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let value = caps.name("value")?.as_str();
                let unit = caps.name("unit")?.as_str();
                Some(UnitToken::new(value, unit))
            })
            .collect();
        Segments { tokens }
    }
}
