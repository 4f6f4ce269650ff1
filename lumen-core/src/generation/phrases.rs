//! Structured phrase output checks
//!
//! A phrase list is a JSON array of objects, each carrying the four
//! non-empty string fields in [`PHRASE_FIELDS`].

use serde_json::Value;
use thiserror::Error;

/// Required keys of every phrase object
pub const PHRASE_FIELDS: [&str; 4] = ["text", "translation", "category", "difficulty"];

/// Why a model output is not a valid phrase list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON array")]
    NotAnArray,

    #[error("Each item must be an object (item {index})")]
    ItemNotObject { index: usize },

    #[error("Missing or invalid key: {field} (item {index})")]
    InvalidField { index: usize, field: &'static str },
}

/// Remove a surrounding Markdown code fence, with or without a `json` tag
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

/// Check that `text` is a phrase list and return its canonical
/// serialization. Non-ASCII characters are kept as-is.
pub fn validate_phrases(text: &str) -> Result<String, ValidationError> {
    let cleaned = strip_code_fences(text);
    let data: Value =
        serde_json::from_str(cleaned).map_err(|e| ValidationError::InvalidJson(e.to_string()))?;

    let items = data.as_array().ok_or(ValidationError::NotAnArray)?;
    for (index, item) in items.iter().enumerate() {
        let object = item
            .as_object()
            .ok_or(ValidationError::ItemNotObject { index })?;
        for field in PHRASE_FIELDS {
            let valid = object
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|value| !value.trim().is_empty());
            if !valid {
                return Err(ValidationError::InvalidField { index, field });
            }
        }
    }

    serde_json::to_string(&data).map_err(|e| ValidationError::InvalidJson(e.to_string()))
}
