//! Lenient extraction of finding records from loosely documented JSON APIs
//!
//! The `errors` / `corrections` arrays returned by the regional checkers do not
//! follow one schema. Records are read field by field from a small set of known
//! aliases; a record without a usable offset is skipped rather than failing the
//! whole response.

use serde_json::{Map, Value};

use super::error::Unavailable;
use super::finding::{Category, RawFinding};

const OFFSET_KEYS: &[&str] = &["offset", "start", "position", "pos"];
const LENGTH_KEYS: &[&str] = &["length", "len"];
const END_KEYS: &[&str] = &["end"];
const MESSAGE_KEYS: &[&str] = &["message", "help", "description", "msg", "reason"];
const SHORT_MESSAGE_KEYS: &[&str] = &["shortMessage", "short_message", "title"];
const SUGGESTION_KEYS: &[&str] = &[
    "suggestions",
    "replacements",
    "candidates",
    "corrections",
    "suggest",
];
const SINGLE_SUGGESTION_KEYS: &[&str] = &["correction", "replacement", "suggestion"];
const ORIGINAL_KEYS: &[&str] = &["original", "originalText", "token", "word", "orgStr", "bad"];
const CATEGORY_KEYS: &[&str] = &["category", "type", "errorType", "error_type"];

/// Pulls the array stored under `field` and converts every usable record
///
/// A missing field means the backend found nothing. A field that is present but
/// not an array is a malformed response.
pub fn extract_findings(body: &Value, field: &str, text: &str) -> Result<Vec<RawFinding>, Unavailable> {
    let object = body
        .as_object()
        .ok_or_else(|| Unavailable::Malformed("expected a JSON object".to_string()))?;

    let records = match object.get(field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(records)) => records,
        Some(_) => {
            return Err(Unavailable::Malformed(format!(
                "field '{}' is not an array",
                field
            )))
        }
    };

    Ok(records
        .iter()
        .filter_map(|record| record_to_finding(record, text))
        .collect())
}

/// Converts one loosely shaped record, or `None` if it carries no offset
pub fn record_to_finding(record: &Value, text: &str) -> Option<RawFinding> {
    let obj = record.as_object()?;

    let offset = first_usize(obj, OFFSET_KEYS)?;
    let length = first_usize(obj, LENGTH_KEYS)
        .or_else(|| first_usize(obj, END_KEYS).map(|end| end.saturating_sub(offset)))
        .unwrap_or(0);
    let message = first_str(obj, MESSAGE_KEYS).unwrap_or_default();

    let mut raw = RawFinding::new(offset, length, message)
        .with_suggestions(suggestions(obj))
        .with_category(category(obj));

    if let Some(short) = first_str(obj, SHORT_MESSAGE_KEYS) {
        raw = raw.with_short_message(short);
    }
    if let Some(original) = first_str(obj, ORIGINAL_KEYS) {
        raw = raw.with_original_text(original);
    }

    Some(raw.fill_original_from(text))
}

fn first_usize(obj: &Map<String, Value>, keys: &[&str]) -> Option<usize> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

fn suggestion_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => ["value", "text", "word"]
            .iter()
            .find_map(|k| o.get(*k).and_then(Value::as_str).map(str::to_string)),
        _ => None,
    }
}

fn suggestions(obj: &Map<String, Value>) -> Vec<String> {
    let listed = SUGGESTION_KEYS.iter().find_map(|key| match obj.get(*key)? {
        Value::Array(items) => Some(items.iter().filter_map(suggestion_value).collect::<Vec<_>>()),
        _ => None,
    });

    listed
        .or_else(|| first_str(obj, SINGLE_SUGGESTION_KEYS).map(|s| vec![s]))
        .unwrap_or_default()
}

fn category(obj: &Map<String, Value>) -> Category {
    let direct = CATEGORY_KEYS.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    });

    let from_rule = || {
        obj.get("rule")?
            .get("category")?
            .get("id")?
            .as_str()
            .map(str::to_string)
    };

    direct
        .or_else(from_rule)
        .map(|label| Category::from_label(&label))
        .unwrap_or(Category::Grammar)
}
