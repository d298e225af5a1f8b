//! Unit tests for typed field extraction.

use super::*;
use crate::error::{Error, LocatorError};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

const ITEM: &str = r#"<Item>
    <ItemID>3001</ItemID>
    <ItemName>Brick 2 x 4</ItemName>
    <Qty> 12 </Qty>
    <BadQty>twelve</BadQty>
    <Price>12.5</Price>
    <BadPrice>1,234.50</BadPrice>
    <UnderscorePrice>1_000.5</UnderscorePrice>
    <Empty></Empty>
    <Listed>2024-03-01</Listed>
    <Flag>TRUE</Flag>
    <Off>false</Off>
    <Retain/>
    <Note>multi<b>part</b> text</Note>
    <Tag kind="storage">A1</Tag>
    <Tag>B2</Tag>
</Item>"#;

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

mod string_tests {
    use super::*;

    #[test]
    fn reads_element_text() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let value = node_as_string(Some(doc.root_element()), "./ItemName", "").unwrap();
        assert_eq!(value, "Brick 2 x 4");
    }

    #[test]
    fn missing_element_yields_default() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let value = node_as_string(Some(doc.root_element()), "./Remarks", "none").unwrap();
        assert_eq!(value, "none");
    }

    #[test]
    fn empty_element_yields_default() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let value = node_as_opt_string(Some(doc.root_element()), "./Empty").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn absent_node_yields_default() {
        let value = node_as_string(None, "./ItemID", "fallback").unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn concatenates_nested_text() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let value = node_as_string(Some(doc.root_element()), "./Note", "").unwrap();
        assert_eq!(value, "multipart text");
    }

    #[test]
    fn collects_all_matches() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let values = nodes_as_strings(Some(doc.root_element()), "./Tag").unwrap();
        assert_eq!(values, vec!["A1", "B2"]);
    }

    #[test]
    fn invalid_locator_is_an_error() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let result = node_as_string(Some(doc.root_element()), "./Item//Name", "");
        assert!(matches!(
            result,
            Err(Error::InvalidLocator(LocatorError::EmptyStep(_)))
        ));
    }

    #[test]
    fn reads_attributes() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let tag = doc
            .root_element()
            .children()
            .find(|n| n.has_tag_name("Tag"))
            .unwrap();
        assert_eq!(attribute_text(Some(tag), "kind", ""), "storage");
        assert_eq!(attribute_text(Some(tag), "missing", "x"), "x");
        assert_eq!(attribute_text(None, "kind", "x"), "x");
    }
}

mod numeric_tests {
    use super::*;

    #[test]
    fn reads_padded_integer() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let qty = node_as_int(Some(doc.root_element()), "./Qty", None).unwrap();
        assert_eq!(qty, Some(12));
    }

    #[test]
    fn malformed_integer_yields_default() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let qty = node_as_int(Some(doc.root_element()), "./BadQty", Some(1)).unwrap();
        assert_eq!(qty, Some(1));
    }

    #[test]
    fn missing_integer_yields_none() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let lot = node_as_int(Some(doc.root_element()), "./LotID", None).unwrap();
        assert_eq!(lot, None);
    }

    #[test]
    fn reads_decimal() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let price = node_as_decimal(Some(doc.root_element()), "./Price", None).unwrap();
        assert_eq!(price, Some(dec!(12.5)));
    }

    #[test]
    fn grouped_decimal_yields_default() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let price = node_as_decimal(Some(doc.root_element()), "./BadPrice", None).unwrap();
        assert_eq!(price, None);

        let price =
            node_as_decimal(Some(doc.root_element()), "./UnderscorePrice", Some(dec!(0))).unwrap();
        assert_eq!(price, Some(dec!(0)));
        assert_eq!(parse_decimal("1_000.5"), None);
    }

    #[test]
    fn parse_int_handles_sign_and_whitespace() {
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("+7"), Some(7));
        assert_eq!(parse_int(" 42\n"), Some(42));
        assert_eq!(parse_int("4.2"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn parse_decimal_is_locale_invariant() {
        assert_eq!(parse_decimal("0.0400"), Some(dec!(0.04)));
        assert_eq!(parse_decimal("-3"), Some(dec!(-3)));
        assert_eq!(parse_decimal("1.25e1"), Some(dec!(12.5)));
        assert_eq!(parse_decimal("0,04"), None);
        assert_eq!(parse_decimal("1 000"), None);
        assert_eq!(parse_decimal("abc"), None);
    }
}

mod datetime_tests {
    use super::*;

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_datetime("2024-03-01"), Some(midnight(2024, 3, 1)));
    }

    #[test]
    fn parses_compact_date() {
        assert_eq!(parse_datetime("20240301"), Some(midnight(2024, 3, 1)));
    }

    #[test]
    fn parses_naive_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-03-01T10:30:00"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01 10:30:00"), Some(expected));
    }

    #[test]
    fn converts_offsets_to_utc() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-03-01T10:30:00+02:00"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_datetime("yesterday"), None);
        assert_eq!(parse_datetime(""), None);
    }

    #[test]
    fn reads_date_from_node() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        let listed = node_as_datetime(Some(doc.root_element()), "./Listed", None).unwrap();
        assert_eq!(listed, Some(midnight(2024, 3, 1)));
    }
}

mod bool_tests {
    use super::*;

    #[test]
    fn reads_true_case_insensitively() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        assert!(node_as_bool(Some(doc.root_element()), "./Flag", false).unwrap());
    }

    #[test]
    fn false_text_yields_default() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        assert!(node_as_bool(Some(doc.root_element()), "./Off", true).unwrap());
        assert!(!node_as_bool(Some(doc.root_element()), "./Off", false).unwrap());
    }

    #[test]
    fn empty_marker_yields_default() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        assert!(!node_as_bool(Some(doc.root_element()), "./Retain", false).unwrap());
    }

    #[test]
    fn parse_bool_accepts_one() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("0"), None);
        assert_eq!(parse_bool("yes"), None);
    }
}

mod exists_tests {
    use super::*;

    #[test]
    fn detects_empty_marker_element() {
        let doc = roxmltree::Document::parse(ITEM).unwrap();
        assert!(node_exists(Some(doc.root_element()), "./Retain").unwrap());
        assert!(!node_exists(Some(doc.root_element()), "./Stockroom").unwrap());
        assert!(!node_exists(None, "./Retain").unwrap());
    }
}
