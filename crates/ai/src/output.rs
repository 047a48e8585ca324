//! Interpretation of raw model output.

use bidtrack_core::tender::clamp_percent;
use serde_json::{json, Value};

/// Keys that may carry a compatibility score, in lookup order.
const SCORE_KEYS: &[&str] = &["score", "aiScore", "compatibilityScore", "matchScore"];

/// Turn the model's text into the JSON relayed to callers.
///
/// A JSON object or array (optionally inside a Markdown code fence) is
/// returned as-is. Anything else is wrapped as `{"content": text}`.
pub fn parse_model_output(text: &str) -> Value {
    let trimmed = strip_code_fence(text.trim());
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        _ => json!({ "content": text.trim() }),
    }
}

/// Read a 0..=100 score from a relayed answer.
///
/// Accepts numbers and numeric strings; fractional values are rounded and
/// out-of-range values clamped.
pub fn extract_score(value: &Value) -> Option<i32> {
    let raw = SCORE_KEYS.iter().find_map(|key| value.get(*key))?;
    let number = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(clamp_percent(number.round().clamp(-1.0, 101.0) as i32))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_is_relayed_unchanged() {
        let out = parse_model_output(r#"{"score": 72, "summary": "Good fit"}"#);
        assert_eq!(out, json!({"score": 72, "summary": "Good fit"}));
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let out = parse_model_output("```json\n{\"riskLevel\": \"high\"}\n```");
        assert_eq!(out["riskLevel"], "high");
    }

    #[test]
    fn prose_is_wrapped_as_content() {
        let out = parse_model_output("  Dear Sir, we are pleased to submit...  ");
        assert_eq!(out, json!({"content": "Dear Sir, we are pleased to submit..."}));
    }

    #[test]
    fn bare_json_scalar_is_wrapped() {
        assert_eq!(parse_model_output("42"), json!({"content": "42"}));
    }

    #[test]
    fn score_from_number_or_string() {
        assert_eq!(extract_score(&json!({"score": 71.6})), Some(72));
        assert_eq!(extract_score(&json!({"aiScore": "85%"})), Some(85));
        assert_eq!(extract_score(&json!({"matchScore": 140})), Some(100));
        assert_eq!(extract_score(&json!({"score": -3})), Some(0));
    }

    #[test]
    fn missing_or_garbage_score_is_none() {
        assert_eq!(extract_score(&json!({"content": "no number here"})), None);
        assert_eq!(extract_score(&json!({"score": "high"})), None);
        assert_eq!(extract_score(&json!({"score": null})), None);
    }
}
