//! Query parameter text parsing.
//!
//! The params pane accepts either a JSON object or `key=value&key=value` text.
//! Parsing never fails: anything that is not a JSON object goes through the
//! pair splitter, which is total over strings.

use serde_json::Value;

/// Decoded query parameters, in the order they were written.
pub type Params = serde_json::Map<String, Value>;

pub fn parse_params(text: &str) -> Params {
    if text.trim().is_empty() {
        return Params::new();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::debug!(kind = json_kind(&other), "params are JSON but not an object, splitting pairs");
            parse_pairs(text)
        }
        Err(_) => parse_pairs(text),
    }
}

/// `&`-separated `key=value` segments. Segments without `=` are dropped and a
/// repeated key keeps its last value.
fn parse_pairs(text: &str) -> Params {
    let mut params = Params::new();
    for segment in text.split('&') {
        if let Some((key, value)) = segment.split_once('=') {
            params.insert(
                key.trim().to_string(),
                Value::String(value.trim().to_string()),
            );
        }
    }
    params
}

/// Flatten parameters into wire pairs.
///
/// Strings go out verbatim, numbers and booleans as their JSON text, `null`
/// is omitted, arrays repeat the key per element and objects are sent as
/// compact JSON.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_value(params: Params) -> Value {
        Value::Object(params)
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(parse_params("").is_empty());
        assert!(parse_params("   ").is_empty());
        assert!(parse_params("\n\t").is_empty());
    }

    #[test]
    fn ampersand_pairs() {
        assert_eq!(as_value(parse_params("a=1&b=2")), json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn json_object_is_taken_verbatim() {
        assert_eq!(as_value(parse_params(r#"{"a":1}"#)), json!({"a": 1}));
        assert_eq!(
            as_value(parse_params(r#"{"q": "rust", "tags": ["a", "b"], "n": null}"#)),
            json!({"q": "rust", "tags": ["a", "b"], "n": null})
        );
    }

    #[test]
    fn pairs_are_trimmed_and_keep_text_after_first_equals() {
        let params = parse_params(" a = 1 & token = x=y ");
        assert_eq!(as_value(params), json!({"a": "1", "token": "x=y"}));
    }

    #[test]
    fn segments_without_equals_are_dropped() {
        let params = parse_params("flag&a=1&&b");
        assert_eq!(as_value(params), json!({"a": "1"}));
    }

    #[test]
    fn last_duplicate_wins_in_first_position() {
        let params = parse_params("a=1&b=2&a=3");
        assert_eq!(as_value(params.clone()), json!({"a": "3", "b": "2"}));
        let keys: Vec<_> = params.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn non_object_json_falls_back_to_pairs() {
        assert!(parse_params("[1, 2]").is_empty());
        assert!(parse_params("42").is_empty());
        assert_eq!(as_value(parse_params(r#""a=1""#)), json!({"\"a": "1\""}));
    }

    #[test]
    fn malformed_json_falls_back_to_pairs() {
        assert_eq!(as_value(parse_params(r#"{"a": 1"#)), json!({}));
        assert_eq!(as_value(parse_params("{a=1}")), json!({"{a": "1}"}));
    }

    #[test]
    fn query_pairs_coerce_non_strings() {
        let params = parse_params(
            r#"{"s": "x", "n": 1.5, "b": true, "z": null, "list": [1, null, "two"], "obj": {"k": 1}}"#,
        );
        assert_eq!(
            query_pairs(&params),
            vec![
                ("s".to_string(), "x".to_string()),
                ("n".to_string(), "1.5".to_string()),
                ("b".to_string(), "true".to_string()),
                ("list".to_string(), "1".to_string()),
                ("list".to_string(), "two".to_string()),
                ("obj".to_string(), r#"{"k":1}"#.to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_keep_string_pairs_in_order() {
        let params = parse_params("b=2&a=1");
        assert_eq!(
            query_pairs(&params),
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string()),
            ]
        );
    }
}
