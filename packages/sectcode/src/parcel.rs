//! Parcel (land) number parsing.
//!
//! A parcel designator value lists one or more land numbers separated by
//! `、`. Each number is a main lot with an optional sub lot (`120-6`) or an
//! inclusive range of main lots (`956至960`). Every lot becomes a
//! [`ParcelCode`]: four digits of main lot followed by four digits of sub
//! lot.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::{LIST_SEPARATOR, LOT_SEPARATOR, MAX_PARCEL_PART, PARCEL_PART_WIDTH, RANGE_MARKER};
use crate::error::{MalformedParcelToken, MalformedReason};

/// One lot in the fixed-width `MMMMSSSS` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParcelCode {
    pub main: u16,
    pub sub: u16,
}

impl ParcelCode {
    pub fn new(main: u16, sub: u16) -> Self {
        Self { main, sub }
    }
}

impl fmt::Display for ParcelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$}{:0width$}",
            self.main,
            self.sub,
            width = PARCEL_PART_WIDTH
        )
    }
}

impl Serialize for ParcelCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Codes parsed from one designator value, plus the tokens that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParcelParse {
    pub codes: Vec<ParcelCode>,
    pub skipped: Vec<MalformedParcelToken>,
}

impl ParcelParse {
    /// Whether every token parsed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parse a parcel designator value (unit already stripped).
///
/// Malformed tokens are skipped and reported in [`ParcelParse::skipped`];
/// the remaining tokens still parse.
///
/// # Examples
/// ```
/// use sectcode::parcel::parse_parcel;
///
/// let parsed = parse_parcel("254-43、254-46");
/// let codes: Vec<String> = parsed.codes.iter().map(ToString::to_string).collect();
/// assert_eq!(codes, ["02540043", "02540046"]);
/// ```
pub fn parse_parcel(value: &str) -> ParcelParse {
    let mut parsed = ParcelParse::default();

    for token in value.split(LIST_SEPARATOR).filter(|t| !t.is_empty()) {
        match parse_token(token) {
            Ok(codes) => parsed.codes.extend(codes),
            Err(reason) => {
                tracing::warn!(token = %token, reason = %reason, "Skipping malformed land number");
                parsed.skipped.push(MalformedParcelToken::new(token, reason));
            }
        }
    }

    parsed
}

fn parse_token(token: &str) -> Result<Vec<ParcelCode>, MalformedReason> {
    if token.contains(RANGE_MARKER) {
        return parse_range(token);
    }

    let parts: Vec<&str> = token.split(LOT_SEPARATOR).collect();
    match parts.as_slice() {
        [main] => Ok(vec![ParcelCode::new(parse_main_lot(main)?, 0)]),
        [main, sub] => Ok(vec![ParcelCode::new(parse_main_lot(main)?, parse_part(sub)?)]),
        _ => Err(MalformedReason::SegmentCount(parts.len())),
    }
}

fn parse_range(token: &str) -> Result<Vec<ParcelCode>, MalformedReason> {
    let parts: Vec<&str> = token.split(RANGE_MARKER).collect();
    let [start, end] = parts.as_slice() else {
        return Err(MalformedReason::BadRange);
    };

    let start = parse_main_lot(start)?;
    let end = parse_main_lot(end)?;
    if start > end {
        return Err(MalformedReason::ReversedRange {
            start: u32::from(start),
            end: u32::from(end),
        });
    }

    Ok((start..=end).map(|main| ParcelCode::new(main, 0)).collect())
}

/// Parse a main lot number. Main lots start at 1; a sub lot may be 0.
fn parse_main_lot(part: &str) -> Result<u16, MalformedReason> {
    match parse_part(part)? {
        0 => Err(MalformedReason::OutOfRange(0)),
        main => Ok(main),
    }
}

/// Parse one lot number: plain ASCII digits, at most [`MAX_PARCEL_PART`].
fn parse_part(part: &str) -> Result<u16, MalformedReason> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedReason::NotANumber(part.to_string()));
    }

    let value: u64 = part.parse().map_err(|_| MalformedReason::OutOfRange(u64::MAX))?;
    if value > u64::from(MAX_PARCEL_PART) {
        return Err(MalformedReason::OutOfRange(value));
    }

    u16::try_from(value).map_err(|_| MalformedReason::OutOfRange(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(value: &str) -> Vec<String> {
        parse_parcel(value)
            .codes
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_single_main_lot() {
        assert_eq!(codes("277"), vec!["02770000"]);
    }

    #[test]
    fn test_main_and_sub_lot() {
        assert_eq!(codes("120-6"), vec!["01200006"]);
    }

    #[test]
    fn test_list() {
        assert_eq!(codes("254-43、254-46"), vec!["02540043", "02540046"]);
    }

    #[test]
    fn test_range_expansion() {
        assert_eq!(
            codes("956至960"),
            vec!["09560000", "09570000", "09580000", "09590000", "09600000"]
        );
    }

    #[test]
    fn test_single_element_range() {
        assert_eq!(codes("7至7"), vec!["00070000"]);
    }

    #[test]
    fn test_empty_tokens_skipped_silently() {
        let parsed = parse_parcel("、12、、13、");
        assert_eq!(parsed.codes, vec![ParcelCode::new(12, 0), ParcelCode::new(13, 0)]);
        assert!(parsed.is_clean());
        assert_eq!(parse_parcel(""), ParcelParse::default());
    }

    #[test]
    fn test_too_many_segments() {
        let parsed = parse_parcel("1-2-3、5");
        assert_eq!(parsed.codes, vec![ParcelCode::new(5, 0)]);
        assert_eq!(
            parsed.skipped,
            vec![MalformedParcelToken::new("1-2-3", MalformedReason::SegmentCount(3))]
        );
    }

    #[test]
    fn test_not_a_number() {
        let parsed = parse_parcel("12a-1、5-");
        assert_eq!(
            parsed.skipped,
            vec![
                MalformedParcelToken::new("12a-1", MalformedReason::NotANumber("12a".into())),
                MalformedParcelToken::new("5-", MalformedReason::NotANumber(String::new())),
            ]
        );
        assert!(parsed.codes.is_empty());
    }

    #[test]
    fn test_out_of_range() {
        let parsed = parse_parcel("10000、9999-9999");
        assert_eq!(parsed.codes, vec![ParcelCode::new(9999, 9999)]);
        assert_eq!(
            parsed.skipped,
            vec![MalformedParcelToken::new("10000", MalformedReason::OutOfRange(10000))]
        );
    }

    #[test]
    fn test_zero_main_lot_rejected() {
        let parsed = parse_parcel("0、0-5、0至2、7-0");
        assert_eq!(parsed.codes, vec![ParcelCode::new(7, 0)]);
        let reasons: Vec<MalformedReason> =
            parsed.skipped.into_iter().map(|s| s.reason).collect();
        assert_eq!(reasons, vec![MalformedReason::OutOfRange(0); 3]);
    }

    #[test]
    fn test_leading_zeros_are_decimal() {
        assert_eq!(codes("0120-06"), vec!["01200006"]);
    }

    #[test]
    fn test_malformed_ranges() {
        let parsed = parse_parcel("960至956、1至2至3、1至x");
        assert!(parsed.codes.is_empty());
        let reasons: Vec<MalformedReason> =
            parsed.skipped.into_iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                MalformedReason::ReversedRange { start: 960, end: 956 },
                MalformedReason::BadRange,
                MalformedReason::NotANumber("x".into()),
            ]
        );
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(
            codes("30、1至2、4-1"),
            vec!["00300000", "00010000", "00020000", "00040001"]
        );
    }

    #[test]
    fn test_parcel_code_serializes_as_string() {
        let json = serde_json::to_string(&vec![ParcelCode::new(277, 0)]).unwrap();
        assert_eq!(json, r#"["02770000"]"#);
    }
}
