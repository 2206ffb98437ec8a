//! Tests for tolerant decoding

use serde_json::json;

use super::*;

fn make_attrs(value: JsonValue) -> Attributes {
    serde_json::from_value(value).unwrap()
}

// ============================================================================
// BOUNDARY UNION
// ============================================================================

#[test]
fn test_encoded_from_value() {
    assert!(Encoded::from_value(&JsonValue::Null).is_none());
    assert!(matches!(
        Encoded::from_value(&json!("x")),
        Some(Encoded::RawString("x"))
    ));
    assert!(matches!(
        Encoded::from_value(&json!({"a": 1})),
        Some(Encoded::Json(_))
    ));
}

#[test]
fn test_decode_string_and_structured_agree() {
    let raw = json!(r#"{"a":[1,2]}"#);
    let parsed = json!({"a": [1, 2]});
    assert_eq!(
        tolerant_json(&raw).unwrap().into_owned(),
        tolerant_json(&parsed).unwrap().into_owned()
    );
}

#[test]
fn test_decode_malformed_is_absent() {
    for bad in ["{", "[1,", "not json", "{\"a\":}", ""] {
        assert!(tolerant_json(&json!(bad)).is_none(), "{bad:?} should be absent");
    }
}

#[test]
fn test_decode_null_literal_is_absent() {
    assert!(tolerant_json(&json!("null")).is_none());
    assert!(tolerant_json(&JsonValue::Null).is_none());
}

#[test]
fn test_decode_or_raw_passes_text_through() {
    let text = json!("plain text");
    let decoded = Encoded::from_value(&text).unwrap().decode_or_raw();
    assert_eq!(decoded.into_owned(), json!("plain text"));

    let encoded = json!(r#"{"ok":true}"#);
    let decoded = Encoded::from_value(&encoded).unwrap().decode_or_raw();
    assert_eq!(decoded.into_owned(), json!({"ok": true}));
}

#[test]
fn test_shape_checks() {
    assert_eq!(tolerant_array(&json!("[1,2]")), Some(vec![json!(1), json!(2)]));
    assert_eq!(tolerant_array(&json!({"a": 1})), None);
    assert_eq!(tolerant_array(&json!(r#"{"a":1}"#)), None);
    assert!(tolerant_object(&json!(r#"{"a":1}"#)).is_some());
    assert_eq!(tolerant_object(&json!([1])), None);
    assert_eq!(tolerant_object(&json!(5)), None);
}

// ============================================================================
// NESTED LOOKUP
// ============================================================================

#[test]
fn test_nested_count_string_and_object_roots() {
    let as_string = json!(r#"{"openai":{"reasoningTokens":128}}"#);
    let as_object = json!({"openai": {"reasoningTokens": 128}});
    assert_eq!(nested_count(&as_string, &["openai", "reasoningTokens"]), Some(128));
    assert_eq!(nested_count(&as_object, &["openai", "reasoningTokens"]), Some(128));
}

#[test]
fn test_nested_count_rejects_non_numeric() {
    let root = json!({"openai": {"reasoningTokens": "128"}});
    assert_eq!(nested_count(&root, &["openai", "reasoningTokens"]), None);

    let root = json!({"openai": {"reasoningTokens": -3}});
    assert_eq!(nested_count(&root, &["openai", "reasoningTokens"]), None);

    let root = json!({"openai": {"reasoningTokens": 1.5}});
    assert_eq!(nested_count(&root, &["openai", "reasoningTokens"]), None);
}

#[test]
fn test_nested_count_malformed_steps() {
    let path = ["openai", "reasoningTokens"];
    assert_eq!(nested_count(&json!("{broken"), &path), None);
    assert_eq!(nested_count(&json!({"openai": "flat"}), &path), None);
    assert_eq!(nested_count(&json!({"anthropic": {}}), &path), None);
    assert_eq!(nested_count(&json!([1, 2]), &path), None);
    assert_eq!(nested_count(&json!(42), &path), None);
    assert_eq!(nested_count(&JsonValue::Null, &path), None);
}

#[test]
fn test_as_count() {
    assert_eq!(as_count(&json!(0)), Some(0));
    assert_eq!(as_count(&json!(12.0)), Some(12));
    assert_eq!(as_count(&json!(-1)), None);
    assert_eq!(as_count(&json!("12")), None);
    assert_eq!(as_count(&json!(true)), None);
}

// ============================================================================
// ATTRIBUTE HELPERS
// ============================================================================

#[test]
fn test_presence_treats_null_as_absent() {
    let attrs = make_attrs(json!({
        "zero": 0,
        "empty": "",
        "no": false,
        "nothing": null
    }));
    assert!(is_present(&attrs, "zero"));
    assert!(is_present(&attrs, "empty"));
    assert!(is_present(&attrs, "no"));
    assert!(!is_present(&attrs, "nothing"));
    assert!(!is_present(&attrs, "missing"));
    assert!(any_present(&attrs, &["missing", "zero"]));
    assert!(!any_present(&attrs, &["missing", "nothing"]));
}

#[test]
fn test_get_first_str_skips_non_strings() {
    let attrs = make_attrs(json!({ "a": 1, "b": "model-b" }));
    assert_eq!(get_first_str(&attrs, &["a", "b"]), Some("model-b"));
    assert_eq!(get_first_str(&attrs, &["x"]), None);
}

#[test]
fn test_get_text_serializes_structured() {
    let attrs = make_attrs(json!({ "s": "text", "o": {"k": 1}, "n": 3 }));
    assert_eq!(get_text(&attrs, "s"), Some("text".to_string()));
    assert_eq!(get_text(&attrs, "o"), Some(r#"{"k":1}"#.to_string()));
    assert_eq!(get_text(&attrs, "n"), Some("3".to_string()));
    assert_eq!(get_first_text(&attrs, &["missing", "n"]), Some("3".to_string()));
}

#[test]
fn test_counts_accept_numeric_strings_at_top_level() {
    let attrs = make_attrs(json!({ "n": 96, "s": "10", "bad": "ten" }));
    assert_eq!(parse_count(&attrs, "n"), Some(96));
    assert_eq!(parse_count(&attrs, "s"), Some(10));
    assert_eq!(parse_count(&attrs, "bad"), None);
    assert_eq!(first_count(&attrs, &["bad", "s"]), Some(10));
}

#[test]
fn test_floats() {
    let attrs = make_attrs(json!({ "t": 0.7, "s": "0.8", "bad": "warm" }));
    assert_eq!(parse_float(&attrs, "t"), Some(0.7));
    assert_eq!(parse_float(&attrs, "s"), Some(0.8));
    assert_eq!(first_float(&attrs, &["bad", "t"]), Some(0.7));
}

#[test]
fn test_extract_helpers() {
    let attrs = make_attrs(json!({
        "arr": "[{\"role\":\"user\"}]",
        "obj": {"a": 1},
        "broken": "{"
    }));
    assert_eq!(extract_array(&attrs, "arr").map(|a| a.len()), Some(1));
    assert!(extract_object(&attrs, "obj").is_some());
    assert!(extract_json(&attrs, "broken").is_none());
    assert!(extract_array(&attrs, "obj").is_none());
}

#[test]
fn test_get_string_list() {
    let attrs = make_attrs(json!({
        "arr": ["stop", 1, "length"],
        "json": "[\"tool-calls\"]",
        "csv": "stop, length",
        "num": 3
    }));
    assert_eq!(get_string_list(&attrs, "arr"), vec!["stop", "length"]);
    assert_eq!(get_string_list(&attrs, "json"), vec!["tool-calls"]);
    assert_eq!(get_string_list(&attrs, "csv"), vec!["stop", "length"]);
    assert!(get_string_list(&attrs, "num").is_empty());
    assert!(get_string_list(&attrs, "missing").is_empty());
}

#[test]
fn test_field_and_prefix() {
    let map = tolerant_object(&json!({"a": null, "b": 1})).unwrap();
    assert!(field(&map, "a").is_none());
    assert_eq!(field(&map, "b"), Some(&json!(1)));

    let attrs = make_attrs(json!({ "ai.prompt.messages": "[]" }));
    assert!(has_key_prefix(&attrs, "ai."));
    assert!(!has_key_prefix(&attrs, "agent."));
}
