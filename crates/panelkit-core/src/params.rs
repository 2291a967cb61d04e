//! Declarative configuration blobs.
//!
//! Panels and widgets are configured with small JSON objects such as
//! `{"width": 216, "group": "audio", "nameColor": "0xFF237C89"}`. Every key is
//! optional and every getter takes the default to use when the key is absent
//! or malformed, so construction never fails on bad configuration.

use crate::Color;
use log::warn;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error parsing a configuration blob.
#[derive(Debug, Error)]
pub enum ParamError {
    /// The text is not valid JSON.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The document is valid JSON but not an object.
    #[error("configuration must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Parsed key/value configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: Map<String, Value>,
}

impl Params {
    /// Parse `text`, falling back to an empty configuration on error.
    ///
    /// Blank text is an empty configuration.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or_else(|err| {
            warn!("ignoring configuration {text:?}: {err}");
            Self::default()
        })
    }

    /// Parse `text`, reporting malformed input.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a JSON object.
    pub fn try_parse(text: &str) -> Result<Self, ParamError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(text)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ParamError::NotAnObject(json_kind(&other))),
        }
    }

    /// Whether `key` is present (with any value).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Boolean value of `key`.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.typed(key, Value::as_bool, "a boolean").unwrap_or(default)
    }

    /// Integer value of `key`. Fractional numbers are truncated.
    #[must_use]
    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.typed(key, as_i32, "an integer").unwrap_or(default)
    }

    /// Integer value of `key`, or `None` when absent or malformed.
    #[must_use]
    pub fn get_i32_opt(&self, key: &str) -> Option<i32> {
        self.typed(key, as_i32, "an integer")
    }

    /// Floating-point value of `key`.
    #[must_use]
    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.typed(key, |v| v.as_f64().map(|f| f as f32), "a number")
            .unwrap_or(default)
    }

    /// String value of `key`.
    #[must_use]
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.typed(key, |v| v.as_str().map(str::to_string), "a string")
            .unwrap_or_else(|| default.to_string())
    }

    /// Color value of `key`, encoded as an `"0xAARRGGBB"` string.
    #[must_use]
    pub fn get_color(&self, key: &str, default: Color) -> Color {
        let Some(text) = self.typed(key, |v| v.as_str().map(str::to_string), "a color string")
        else {
            return default;
        };
        Color::from_argb_hex(&text).unwrap_or_else(|err| {
            warn!("configuration key {key:?}: {err}; using default");
            default
        })
    }

    fn typed<T>(&self, key: &str, extract: impl Fn(&Value) -> Option<T>, expected: &str) -> Option<T> {
        let value = self.values.get(key)?;
        let extracted = extract(value);
        if extracted.is_none() {
            warn!(
                "configuration key {key:?} should be {expected}, found {}; using default",
                json_kind(value)
            );
        }
        extracted
    }
}

fn as_i32(value: &Value) -> Option<i32> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
        .and_then(|i| i32::try_from(i).ok())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
