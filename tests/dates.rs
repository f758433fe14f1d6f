//! End-to-end tests over the public surface, from raw statement text
//! through detection, resolution, sort keys, and display decoding.

use metadate::{
    best_date, CivilDate, DateDescription, DateRange, DateValue, DecodeOptions, Encoding,
    ParsedDate, Precision, Qualifier, RawDateStatement, Role,
};

const YEAR_ONLY: DecodeOptions<'static> = DecodeOptions {
    allowed_precisions: &[Precision::Year],
    ignore_unparseable: false,
    prefer_original_text: false,
};

fn edtf(text: &str) -> DateValue {
    DateValue::new(RawDateStatement::new(text).with_encoding(Encoding::Edtf))
}

fn detected(text: &str) -> DateValue {
    DateValue::new(RawDateStatement::new(text))
}

#[test]
fn four_digit_ce_years_decode_verbatim() {
    for year in [1000, 1492, 1969, 2023, 9998] {
        let value = edtf(&format!("{year:04}"));
        assert_eq!(value.decoded_value(&YEAR_ONLY), Some(year.to_string()));
    }
}

#[test]
fn nonpositive_years_decode_as_bce() {
    assert_eq!(edtf("0000").decoded_value(&YEAR_ONLY), Some("1 BCE".to_owned()));
    assert_eq!(edtf("-0001").decoded_value(&YEAR_ONLY), Some("2 BCE".to_owned()));
    assert_eq!(edtf("-0299").decoded_value(&YEAR_ONLY), Some("300 BCE".to_owned()));
    // The same rule reached through free-text detection.
    assert_eq!(
        detected("300 B.C.").decoded_value(&YEAR_ONLY),
        Some("300 BCE".to_owned())
    );
}

#[test]
fn sort_keys_are_chronologically_monotonic() {
    let keys: Vec<String> = ["-35", "-1", "0", "22", "966", "19xx", "196x", "2023"]
        .iter()
        .map(|text| edtf(text).sort_key())
        .collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1], "{:?} !< {:?}", pair[0], pair[1]);
    }
}

#[test]
fn day_precision_round_trip() {
    let value = detected("2019-08-10");
    assert_eq!(value.precision(), Some(Precision::Day));
    assert_eq!(value.sort_key(), "2019-08-10");
    assert_eq!(
        value.decoded_value(&DecodeOptions::default()),
        Some("August 10, 2019".to_owned())
    );
}

#[test]
fn range_decodes_at_year_precision() {
    let range = DateRange::from_statements([
        RawDateStatement::new("2020-01-01")
            .with_encoding(Encoding::W3cdtf)
            .with_role(Role::Start),
        RawDateStatement::new("2021-10-31")
            .with_encoding(Encoding::W3cdtf)
            .with_role(Role::End),
    ])
    .unwrap();
    assert_eq!(range.decoded_value(&YEAR_ONLY), Some("2020 - 2021".to_owned()));
}

#[test]
fn marc_millennium_sentinel_has_exact_boundaries() {
    let value = DateValue::new(RawDateStatement::new("1uuu").with_encoding(Encoding::Marc));
    let resolved = value.value().unwrap();
    assert_eq!(
        resolved.earliest(),
        Some(CivilDate {
            year: 1000,
            month: 1,
            day: 1
        })
    );
    assert_eq!(
        resolved.latest(),
        Some(CivilDate {
            year: 1999,
            month: 12,
            day: 31
        })
    );
}

#[test]
fn marc_unparsable_sentinels() {
    for text in ["9999", "uuuu", "||||", "0000-00-00"] {
        let value = DateValue::new(RawDateStatement::new(text).with_encoding(Encoding::Marc));
        assert!(!value.parsed(), "{text:?} should not parse");
    }
}

#[test]
fn slash_date_century_inference() {
    assert_eq!(detected("12/1/99").sort_key(), "1999-12-01");
    assert_eq!(detected("12/1/17").sort_key(), "2017-12-01");
}

#[test]
fn unparseable_text_survives_as_original() {
    let value = detected("chez Villeneuve");
    assert!(!value.parsed());
    let options = DecodeOptions {
        prefer_original_text: true,
        ..Default::default()
    };
    assert_eq!(
        value.decoded_value(&options),
        Some("chez Villeneuve".to_owned())
    );
}

#[test]
fn resolution_is_idempotent() {
    let value = detected("the 1960's");
    let first = (
        value.sort_key(),
        value.decoded_value(&DecodeOptions::default()),
        value.base_value(),
    );
    let second = (
        value.sort_key(),
        value.decoded_value(&DecodeOptions::default()),
        value.base_value(),
    );
    assert_eq!(first, second);
    assert_eq!(first.1, Some("1960s".to_owned()));
}

#[test]
fn best_date_prefers_primary_within_event_type() {
    let candidate = |text: &str, event: &str, primary: bool| {
        ParsedDate::Value(DateValue::new(
            RawDateStatement::new(text)
                .with_event_type(event)
                .with_primary(primary),
        ))
    };
    let candidates = [
        candidate("2019", "creation", false),
        candidate("2020", "publication", true),
        candidate("2021", "publication", false),
    ];
    let best = best_date(&candidates, Some("publication"), false).unwrap();
    assert_eq!(best.decoded_value(&YEAR_ONLY), Some("2020".to_owned()));
}

#[test]
fn qualifier_markup_round_trip() {
    let approximate = DateValue::new(
        RawDateStatement::new("1920").with_qualifier(Qualifier::Approximate),
    );
    assert_eq!(approximate.qualified_value(), Some("[ca. 1920]".to_owned()));

    let questionable = DateValue::new(
        RawDateStatement::new("1920").with_qualifier(Qualifier::Questionable),
    );
    assert_eq!(questionable.qualified_value(), Some("[1920?]".to_owned()));
}

#[test]
fn legacy_notations_normalize() {
    let cases = [
        ("MDCCLXXVI", "1776-00-00"),
        ("xvi", "15---00-00"),
        ("18th century", "17---00-00"),
        ("18--", "18---00-00"),
        ("196-", "196--00-00"),
        ("printed in 1820, London", "1820-00-00"),
        ("anno 966", "0966-00-00"),
        ("[18]20", "1820-00-00"),
        ("66", "0066-00-00"),
    ];
    for (text, expected) in cases {
        assert_eq!(detected(text).sort_key(), expected, "for {text:?}");
    }
}

#[test]
fn descriptions_deserialize_end_to_end() {
    let document = r#"[
        {"value": "2019", "type": "creation", "encoding": {"code": "w3cdtf"}},
        {"value": "2020", "type": "publication", "status": "primary",
         "encoding": {"code": "w3cdtf"}},
        {"value": "2021", "type": "publication", "encoding": {"code": "w3cdtf"}},
        {"value": "n.d.", "type": "publication"}
    ]"#;
    let descriptions: Vec<DateDescription> = serde_json::from_str(document).unwrap();
    let candidates: Vec<ParsedDate> = descriptions
        .iter()
        .filter_map(DateDescription::to_parsed_date)
        .collect();
    assert_eq!(candidates.len(), 4);

    let best = best_date(&candidates, Some("publication"), false).unwrap();
    assert!(best.is_primary());
    assert_eq!(best.decoded_value(&YEAR_ONLY), Some("2020".to_owned()));
}

#[test]
fn structured_descriptions_build_ranges() {
    let document = r#"{
        "type": "publication",
        "structuredValue": [
            {"value": "1920", "type": "start"},
            {"value": "1930", "type": "end"}
        ]
    }"#;
    let description: DateDescription = serde_json::from_str(document).unwrap();
    let ParsedDate::Range(range) = description.to_parsed_date().unwrap() else {
        panic!("expected a range");
    };
    assert_eq!(range.decoded_value(&YEAR_ONLY), Some("1920 - 1930".to_owned()));
    assert_eq!(range.as_interval(), "1920/1930");
    assert_eq!(range.sort_key(), "1920-00-00");
}
