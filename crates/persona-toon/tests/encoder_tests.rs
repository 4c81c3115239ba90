/// Encoder contract tests for flat TOON.
///
/// A top-level object becomes `key=value` fragments joined by `|`, in
/// insertion order. Sequences are comma-joined, nested objects are compact
/// JSON islands, scalars use their textual form.
use persona_toon::{encode, encode_value, ToonError};
use serde_json::json;

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn encode_string_field() {
    assert_eq!(encode(r#"{"name":"Alice"}"#).unwrap(), "name=Alice");
}

#[test]
fn encode_integer_field() {
    assert_eq!(encode(r#"{"age":7}"#).unwrap(), "age=7");
}

#[test]
fn encode_float_field() {
    assert_eq!(encode(r#"{"ratio":0.75}"#).unwrap(), "ratio=0.75");
}

#[test]
fn encode_bool_and_null_fields() {
    let toon = encode(r#"{"ok":true,"missing":null}"#).unwrap();
    assert_eq!(toon, "ok=true|missing=null");
}

#[test]
fn encode_empty_string_field() {
    assert_eq!(encode(r#"{"nick":""}"#).unwrap(), "nick=");
}

// ============================================================================
// Field order and separators
// ============================================================================

#[test]
fn encode_preserves_insertion_order() {
    let toon = encode(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    assert_eq!(toon, "z=1|a=2|m=3");
}

#[test]
fn encode_empty_object() {
    assert_eq!(encode("{}").unwrap(), "");
}

#[test]
fn encode_does_not_escape_separators() {
    // Known ambiguity: the decoder will split this value apart.
    let toon = encode(r#"{"note":"a|b=c,d"}"#).unwrap();
    assert_eq!(toon, "note=a|b=c,d");
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn encode_string_sequence() {
    let toon = encode_value(&json!({"tags": ["a", "b", "c"]})).unwrap();
    assert_eq!(toon, "tags=a,b,c");
}

#[test]
fn encode_numeric_sequence() {
    let toon = encode_value(&json!({"scores": [95, 87.5, 92]})).unwrap();
    assert_eq!(toon, "scores=95,87.5,92");
}

#[test]
fn encode_empty_sequence() {
    let toon = encode_value(&json!({"tags": []})).unwrap();
    assert_eq!(toon, "tags=");
}

#[test]
fn encode_sequence_of_objects_is_not_reencoded() {
    let toon = encode_value(&json!({"annotations": [{"x": 1}, {"y": "z"}]})).unwrap();
    assert_eq!(toon, r#"annotations={"x":1},{"y":"z"}"#);
}

// ============================================================================
// Nested objects
// ============================================================================

#[test]
fn encode_nested_object_as_compact_json() {
    let toon = encode_value(&json!({
        "hair": {"color": "brown", "length_cm": 30, "styles": ["bun", "braid"]}
    }))
    .unwrap();
    assert_eq!(
        toon,
        r#"hair={"color":"brown","length_cm":30,"styles":["bun","braid"]}"#
    );
}

#[test]
fn encode_empty_nested_object() {
    let toon = encode_value(&json!({"meta": {}})).unwrap();
    assert_eq!(toon, "meta={}");
}

#[test]
fn encode_character_record_shape() {
    let toon = encode_value(&json!({
        "meta": {"source": "upload"},
        "general": {"age_estimate": 30},
        "annotations": ["freckles", "glasses"],
        "notes": "smiling"
    }))
    .unwrap();
    assert_eq!(
        toon,
        r#"meta={"source":"upload"}|general={"age_estimate":30}|annotations=freckles,glasses|notes=smiling"#
    );
}

// ============================================================================
// Contract violations
// ============================================================================

#[test]
fn encode_rejects_top_level_array() {
    let err = encode("[1,2,3]").unwrap_err();
    assert!(matches!(err, ToonError::Encode(_)), "got {err:?}");
}

#[test]
fn encode_rejects_top_level_scalar() {
    assert!(matches!(encode("42"), Err(ToonError::Encode(_))));
    assert!(matches!(encode("\"hi\""), Err(ToonError::Encode(_))));
    assert!(matches!(encode("null"), Err(ToonError::Encode(_))));
}

#[test]
fn encode_rejects_invalid_json() {
    assert!(matches!(encode("{not json"), Err(ToonError::JsonParse(_))));
}
