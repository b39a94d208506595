use pretty_assertions::assert_eq;
use scraper_engine::{decode_records, DecodeError, Record};

#[test]
fn decodes_wire_records_in_payload_order() {
    let body = br#"[
        {"ID":"cab1","PosX":1,"PosY":2,"Available":true},
        {"ID":"cab2","PosX":-40,"PosY":7,"Available":false}
    ]"#;
    let records = decode_records(body).unwrap();
    assert_eq!(
        records,
        vec![
            Record::new("cab1", 1, 2, true),
            Record::new("cab2", -40, 7, false),
        ]
    );
}

#[test]
fn empty_array_is_a_valid_empty_batch() {
    assert!(decode_records(b"[]").unwrap().is_empty());
}

#[test]
fn malformed_json_is_an_error() {
    let err = decode_records(b"{not json").unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn object_instead_of_array_is_an_error() {
    assert!(decode_records(br#"{"ID":"cab1"}"#).is_err());
}

#[test]
fn missing_fields_default_and_unknown_fields_are_ignored() {
    let records = decode_records(br#"[{"ID":"cab9","Driver":"x"}]"#).unwrap();
    assert_eq!(records, vec![Record::new("cab9", 0, 0, false)]);
}

#[test]
fn null_field_keeps_the_record_with_a_zero_value() {
    let body = br#"[
        {"ID":"a","PosX":null,"PosY":3,"Available":true},
        {"ID":"b","PosX":4,"PosY":5,"Available":false}
    ]"#;
    let records = decode_records(body).unwrap();
    assert_eq!(
        records,
        vec![Record::new("a", 0, 3, true), Record::new("b", 4, 5, false)]
    );
}

#[test]
fn mistyped_field_is_coerced_and_the_batch_survives() {
    let body = br#"[
        {"ID":"a","PosX":1.5,"PosY":2,"Available":"yes"},
        {"ID":"b","PosX":6,"PosY":7,"Available":true}
    ]"#;
    let records = decode_records(body).unwrap();
    assert_eq!(
        records,
        vec![Record::new("a", 0, 2, false), Record::new("b", 6, 7, true)]
    );
}

#[test]
fn non_object_element_becomes_a_zero_record() {
    let records = decode_records(br#"[7, {"ID":"c","PosX":1,"PosY":1,"Available":true}]"#).unwrap();
    assert_eq!(
        records,
        vec![Record::new("", 0, 0, false), Record::new("c", 1, 1, true)]
    );
}
