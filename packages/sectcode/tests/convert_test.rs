//! End-to-end conversion against the fixture reference tables.

use std::path::PathBuf;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use sectcode::{ConverterConfig, MalformedReason, SectCodeConverter, SectCodeError};
use sectcode_reference::load_table;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn converter() -> SectCodeConverter {
    let table = load_table(&fixture("reference.yaml")).unwrap();
    SectCodeConverter::new(Arc::new(table), &ConverterConfig::default()).unwrap()
}

#[test]
fn test_town_section_parcel_without_county() {
    let converter = converter();

    let token = converter.tokenize("烏日區北里段277地號");
    assert_eq!(token.county, "");
    assert_eq!(token.town, "烏日區");
    assert_eq!(token.section, "北里段");
    assert_eq!(token.parcel.value, "277");
    assert_eq!(token.parcel.unit, "地號");

    let code = converter.convert_address("烏日區北里段277地號").unwrap();
    assert_eq!(code.county_code, "B");
    assert_eq!(code.town_code, "B13");
    assert_eq!(code.section_code, "0312");
    assert_eq!(code.parcel_code_strings(), vec!["02770000"]);
}

#[test]
fn test_small_section() {
    let code = converter()
        .convert_address("竹北市三崁店段三崁店小段120-6地號")
        .unwrap();
    assert_eq!(code.county_code, "J");
    assert_eq!(code.town_code, "J01");
    assert_eq!(code.section_code, "0457");
    assert_eq!(code.parcel_code_strings(), vec!["01200006"]);
}

#[test]
fn test_chinese_numerals_and_list() {
    let code = converter()
        .convert_address("雲林縣口湖鄉梧北段二五四之四十三、二五四之四十六地號")
        .unwrap();
    assert_eq!(
        (code.county_code.as_str(), code.town_code.as_str(), code.section_code.as_str()),
        ("P", "P12", "0702")
    );
    assert_eq!(code.parcel_code_strings(), vec!["02540043", "02540046"]);
}

#[test]
fn test_full_width_input() {
    let code = converter()
        .convert_address("台中市　大里區 大里段１０６４地號")
        .unwrap();
    assert_eq!(code.town_code, "B12");
    assert_eq!(code.section_code, "0188");
    assert_eq!(code.parcel_code_strings(), vec!["10640000"]);
}

#[test]
fn test_range_expansion() {
    let code = converter()
        .convert_address("臺中市烏日區烏日段956至960地號")
        .unwrap();
    assert_eq!(code.section_code, "0301");
    assert_eq!(
        code.parcel_code_strings(),
        vec!["09560000", "09570000", "09580000", "09590000", "09600000"]
    );
}

#[test]
fn test_county_scopes_ambiguous_town() {
    let converter = converter();

    let code = converter.convert_address("臺南市東區東門段5地號").unwrap();
    assert_eq!(code.county_code, "D");
    assert_eq!(code.town_code, "D01");
    assert_eq!(code.section_code, "0105");

    let code = converter.convert_address("臺中市東區東門段5地號").unwrap();
    assert_eq!(code.town_code, "B02");
    assert_eq!(code.section_code, "");
}

#[test]
fn test_unregistered_section_is_not_an_error() {
    let code = converter()
        .convert_address("臺中市烏日區無名段12地號")
        .unwrap();
    assert_eq!(code.section_code, "");
    assert_eq!(code.parcel_code_strings(), vec!["00120000"]);
}

#[test]
fn test_malformed_parcel_is_reported_not_fatal() {
    let code = converter()
        .convert_address("臺中市烏日區北里段1-2-3、960至956、8地號")
        .unwrap();
    assert_eq!(code.parcel_code_strings(), vec!["00080000"]);
    let reasons: Vec<MalformedReason> = code.warnings.iter().map(|w| w.reason.clone()).collect();
    assert_eq!(
        reasons,
        vec![
            MalformedReason::SegmentCount(3),
            MalformedReason::ReversedRange { start: 960, end: 956 },
        ]
    );
}

#[test]
fn test_unknown_place_is_unresolved() {
    let err = converter().convert_address("花蓮縣某鄉某段1地號").unwrap_err();
    match err {
        SectCodeError::UnresolvedAddress {
            address,
            county,
            town,
        } => {
            assert_eq!(address, "花蓮縣某鄉某段1地號");
            assert_eq!(county, "");
            assert_eq!(town, "");
        }
        other => panic!("expected UnresolvedAddress, got {other}"),
    }
}

#[test]
fn test_county_without_town_is_unresolved() {
    let err = converter().convert_address("臺中市北里段277地號").unwrap_err();
    assert!(matches!(err, SectCodeError::UnresolvedAddress { .. }));
}

#[test]
fn test_mirror_and_snapshot_convert_alike() {
    let mirror = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../reference/tests/fixtures/nlsc");
    let from_mirror =
        SectCodeConverter::from_path(&mirror, &ConverterConfig::default()).unwrap();
    let from_snapshot = converter();

    for address in [
        "烏日區北里段277地號",
        "竹北市三崁店段三崁店小段120-6地號",
        "雲林縣口湖鄉梧北段二五四之四十三地號",
    ] {
        assert_eq!(
            from_mirror.convert_address(address).unwrap(),
            from_snapshot.convert_address(address).unwrap(),
            "{address}"
        );
    }
}
