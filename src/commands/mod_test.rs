// Tests for query type tags and status helpers

use super::*;
use std::str::FromStr;

#[test]
fn test_query_type_tags_round_trip() {
    for qt in QueryType::ALL {
        assert_eq!(QueryType::from_str(qt.tag()).unwrap(), qt);
        assert_eq!(qt.to_string(), qt.tag());
    }
}

#[test]
fn test_query_type_parse_ignores_case() {
    assert_eq!("word_sense".parse::<QueryType>().unwrap(), QueryType::WordSense);
    assert_eq!(" Part_Of_Speech ".parse::<QueryType>().unwrap(), QueryType::PartOfSpeech);
}

#[test]
fn test_query_type_parse_unknown() {
    let err = "SYNONYM".parse::<QueryType>().unwrap_err();
    assert!(err.contains("SYNONYM"));
}

#[test]
fn test_query_type_serializes_as_tag() {
    let json = serde_json::to_string(&QueryType::DictionaryEntry).unwrap();
    assert_eq!(json, "\"DICTIONARY_ENTRY\"");
}

#[test]
fn test_status_helpers() {
    assert_eq!(identifier("run"), "run");
    assert_eq!(sense_identifier("run", 2), "run#2");
    assert_eq!(not_supported_status("SYNONYM"), "SYNONYM: query type not supported");
}
