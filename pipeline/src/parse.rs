//! Response validator/parser — model text to a checked app description
//!
//! Extraction is two-stage: parse the fence-stripped text as-is, then retry
//! on the span between the first `{` and the last `}`. Extraction can still
//! fail; every failure routes the caller to the fallback synthesizer, never
//! to a user-visible error.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::bundle::GeneratedApp;
use crate::classify::AppCategory;
use crate::error::GenerateError;
use crate::request::GenerationRequest;

/// Parse and validate raw model output against the prompt contract.
pub fn parse_response(
    raw: &str,
    request: &GenerationRequest,
    category: AppCategory,
) -> Result<GeneratedApp, GenerateError> {
    let value = extract_json(raw)?;

    let object = value
        .as_object()
        .ok_or_else(|| malformed("top-level value is not an object"))?;

    let title = require_string(object, "title")?;
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing \"description\""))?
        .to_string();

    let code = object
        .get("code")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing \"code\" object"))?;

    let mut source_code = BTreeMap::new();
    for (label, source) in code {
        // Labels become bundle file paths; only plain identifiers are safe.
        if !is_valid_label(label) {
            return Err(malformed(&format!("invalid code label {label:?}")));
        }
        if let Some(text) = source.as_str() {
            source_code.insert(label.clone(), text.to_string());
        }
    }
    match source_code.get("App") {
        Some(app) if !app.trim().is_empty() => {}
        _ => return Err(malformed("\"code.App\" is missing, empty, or not text")),
    }

    let config = object
        .get("config")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing \"config\" object"))?;
    for key in ["theme", "layout"] {
        if config.get(key).and_then(Value::as_str).is_none() {
            return Err(malformed(&format!("missing \"config.{key}\"")));
        }
    }
    let features = config
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing \"config.features\" array"))?;
    let feature_list: Vec<String> = features
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    Ok(GeneratedApp {
        title,
        description,
        // The classifier's category is authoritative; the model's echoed
        // config is validated for presence only.
        app_type: category,
        source_code,
        feature_list,
        theme: request.theme,
        layout: request.layout,
    })
}

fn malformed(reason: &str) -> GenerateError {
    GenerateError::MalformedResponse(reason.to_string())
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|ch| ch.is_ascii_alphanumeric())
}

fn require_string(
    object: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, GenerateError> {
    match object.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(malformed(&format!("missing \"{key}\""))),
    }
}

/// Two-stage JSON extraction: fence-stripped full text first, then the
/// first-`{`-to-last-`}` span.
fn extract_json(raw: &str) -> Result<Value, GenerateError> {
    let stripped = strip_fences(raw);

    if let Ok(value) = serde_json::from_str::<Value>(stripped) {
        return Ok(value);
    }

    let start = stripped.find('{');
    let end = stripped.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&stripped[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(malformed("response text is not parseable as a JSON object"))
}

/// Remove a leading/trailing markdown code fence if present.
fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if text.starts_with("```") {
        // Drop the opening fence line, including a language tag like ```json.
        text = match text.find('\n') {
            Some(newline) => &text[newline + 1..],
            None => "",
        };
        if let Some(closing) = text.rfind("```") {
            text = &text[..closing];
        }
        text = text.trim();
    }
    text
}
