//! Hierarchical tokenization of normalized addresses.
//!
//! Four passes run over the same remaining text, outermost level first:
//! county, town, section, parcel. Each pass claims its first match and
//! removes it from the remainder, so a later pass never sees text an
//! earlier pass claimed. Removal is tracked as byte spans of the
//! normalized input; the input itself is never rewritten.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use serde::Serialize;

use sectcode_reference::ReferenceLookup;

use crate::config::{PARCEL_UNITS, SECTION_UNITS};
use crate::error::Result;

/// Greedy value followed by a section unit.
#[allow(clippy::expect_used)] // Built from constant unit lists
static SECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(.+)({})", SECTION_UNITS.join("|"))).expect("valid regex")
});

/// Lazy value followed by a parcel unit.
#[allow(clippy::expect_used)] // Built from constant unit lists
static PARCEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(.+?)({})", PARCEL_UNITS.join("|"))).expect("valid regex")
});

/// Which field a claimed span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    County,
    Town,
    Section,
    Parcel,
}

/// Where a field was found in the normalized input.
///
/// A match that straddles text removed by an earlier pass covers more
/// than one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpan {
    pub field: AddressField,
    pub pieces: Vec<Range<usize>>,
}

impl FieldSpan {
    /// Start of the first piece.
    pub fn start(&self) -> Option<usize> {
        self.pieces.first().map(|p| p.start)
    }

    /// Whether any piece of `self` overlaps any piece of `other`.
    pub fn overlaps(&self, other: &FieldSpan) -> bool {
        self.pieces.iter().any(|a| {
            other
                .pieces
                .iter()
                .any(|b| a.start < b.end && b.start < a.end)
        })
    }
}

/// Parcel number text and the unit that closed it ("277", "地號").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParcelDesignator {
    pub value: String,
    pub unit: String,
}

impl ParcelDesignator {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.unit.is_empty()
    }
}

/// Result of tokenizing one address. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressToken {
    pub county: String,
    pub town: String,
    /// Section name including its unit suffix.
    pub section: String,
    pub parcel: ParcelDesignator,
    /// Spans of the fields that were found, in pass order.
    pub spans: Vec<FieldSpan>,
}

impl AddressToken {
    /// Span of one field, if it was found.
    pub fn span(&self, field: AddressField) -> Option<&FieldSpan> {
        self.spans.iter().find(|s| s.field == field)
    }
}

/// The part of the normalized input no pass has claimed yet.
#[derive(Debug, Clone)]
pub struct Remainder<'a> {
    source: &'a str,
    spans: Vec<Range<usize>>,
}

impl<'a> Remainder<'a> {
    /// The whole input, nothing claimed.
    pub fn new(source: &'a str) -> Self {
        let spans = if source.is_empty() {
            Vec::new()
        } else {
            vec![0..source.len()]
        };
        Self { source, spans }
    }

    /// Unclaimed text, joined across gaps.
    pub fn text(&self) -> Cow<'a, str> {
        match self.spans.as_slice() {
            [] => Cow::Borrowed(""),
            [only] => Cow::Borrowed(&self.source[only.clone()]),
            spans => Cow::Owned(spans.iter().map(|s| &self.source[s.clone()]).collect()),
        }
    }

    /// Unclaimed byte ranges of the input.
    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Map a range of [`Self::text`] to ranges of the input.
    fn to_source(&self, range: &Range<usize>) -> Vec<Range<usize>> {
        let mut pieces = Vec::new();
        let mut offset = 0;
        for span in &self.spans {
            let len = span.len();
            let start = range.start.max(offset);
            let end = range.end.min(offset + len);
            if start < end {
                pieces.push(span.start + (start - offset)..span.start + (end - offset));
            }
            offset += len;
        }
        pieces
    }

    /// Claim a range of [`Self::text`]: returns the claimed input ranges
    /// and the remainder without them.
    pub fn claim(&self, range: Range<usize>) -> (Vec<Range<usize>>, Remainder<'a>) {
        let pieces = self.to_source(&range);
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        for span in &self.spans {
            let mut rest = span.clone();
            for piece in &pieces {
                if piece.start >= rest.end || piece.end <= rest.start {
                    continue;
                }
                if rest.start < piece.start {
                    spans.push(rest.start..piece.start);
                }
                rest = piece.end..rest.end;
            }
            if !rest.is_empty() {
                spans.push(rest);
            }
        }
        let remainder = Remainder {
            source: self.source,
            spans,
        };
        (pieces, remainder)
    }
}

/// Extracts county, town, section and parcel from normalized addresses.
///
/// County and town names are matched exactly with an Aho–Corasick
/// automaton: the leftmost occurrence wins, and among names starting at
/// the same position the longest wins.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    counties: AhoCorasick,
    towns: AhoCorasick,
}

impl Tokenizer {
    /// Build a tokenizer over known county and town names.
    ///
    /// Empty names are ignored.
    pub fn new<S: AsRef<str>>(county_names: &[S], town_names: &[S]) -> Result<Self> {
        Ok(Self {
            counties: build_matcher(county_names)?,
            towns: build_matcher(town_names)?,
        })
    }

    /// Build a tokenizer over every name a lookup knows.
    pub fn from_lookup(lookup: &dyn ReferenceLookup) -> Result<Self> {
        Self::new(&lookup.all_county_names(), &lookup.all_town_names())
    }

    /// Split a normalized address into its fields.
    pub fn tokenize(&self, normalized: &str) -> AddressToken {
        let mut token = AddressToken::default();
        let mut remainder = Remainder::new(normalized);

        if let Some((county, pieces, rest)) = take_name(&self.counties, &remainder) {
            tracing::debug!(county = %county, "county pass matched");
            token.county = county;
            token.spans.push(FieldSpan {
                field: AddressField::County,
                pieces,
            });
            remainder = rest;
        }

        if let Some((town, pieces, rest)) = take_name(&self.towns, &remainder) {
            tracing::debug!(town = %town, "town pass matched");
            token.town = town;
            token.spans.push(FieldSpan {
                field: AddressField::Town,
                pieces,
            });
            remainder = rest;
        }

        if let Some((section, _, pieces, rest)) = take_pattern(&SECTION_PATTERN, &remainder) {
            tracing::debug!(section = %section, "section pass matched");
            token.section = section;
            token.spans.push(FieldSpan {
                field: AddressField::Section,
                pieces,
            });
            remainder = rest;
        }

        if let Some((_, (value, unit), pieces, rest)) = take_pattern(&PARCEL_PATTERN, &remainder)
        {
            tracing::debug!(value = %value, unit = %unit, "parcel pass matched");
            token.parcel = ParcelDesignator { value, unit };
            token.spans.push(FieldSpan {
                field: AddressField::Parcel,
                pieces,
            });
            remainder = rest;
        }

        if !remainder.is_empty() {
            tracing::debug!(unclaimed = %remainder.text(), "text left after tokenizing");
        }

        token
    }
}

fn build_matcher<S: AsRef<str>>(names: &[S]) -> Result<AhoCorasick> {
    let names = names.iter().map(AsRef::as_ref).filter(|n| !n.is_empty());
    Ok(AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(names)?)
}

type Claimed<'a, T> = (T, Vec<Range<usize>>, Remainder<'a>);

fn take_name<'a>(matcher: &AhoCorasick, remainder: &Remainder<'a>) -> Option<Claimed<'a, String>> {
    let text = remainder.text();
    let found = matcher.find(&*text)?;
    let name = text[found.range()].to_string();
    let (pieces, rest) = remainder.claim(found.range());
    Some((name, pieces, rest))
}

/// First match of a `(value)(unit)` pattern: whole match, both groups.
fn take_pattern<'a>(
    pattern: &Regex,
    remainder: &Remainder<'a>,
) -> Option<(String, (String, String), Vec<Range<usize>>, Remainder<'a>)> {
    let text = remainder.text();
    let caps = pattern.captures(&text)?;
    let whole = caps.get(0)?;
    let value = caps.get(1)?.as_str().to_string();
    let unit = caps.get(2)?.as_str().to_string();
    let matched = whole.as_str().to_string();
    let (pieces, rest) = remainder.claim(whole.range());
    Some((matched, (value, unit), pieces, rest))
}
