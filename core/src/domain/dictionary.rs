//! Translation dictionary for one locale.
//!
//! A dictionary is a nested JSON object whose leaves are strings. Keys are
//! addressed with dots: `nav.products` reads `{"nav": {"products": ".."}}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DictionaryError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary(Map<String, Value>);

impl Dictionary {
    /// Parse a bundle; the top level must be an object
    pub fn from_json_str(locale: &str, raw: &str) -> Result<Self, DictionaryError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| DictionaryError::Malformed {
            locale: locale.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_value(locale, value)
    }

    pub fn from_value(locale: &str, value: Value) -> Result<Self, DictionaryError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DictionaryError::Malformed {
                locale: locale.to_string(),
                reason: format!("expected an object at the top level, found {}", kind_of(&other)),
            }),
        }
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// String at a dotted key, if present and a string
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key)?.as_str()
    }

    /// Translate a key; an unknown key renders as itself so gaps stay visible
    pub fn t(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    /// Translate a key and substitute `{name}` placeholders
    pub fn t_fmt(&self, key: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.t(key), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }

    /// Strings of an array at a dotted key; non-string items are skipped
    pub fn strings(&self, key: &str) -> Vec<&str> {
        self.lookup(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deep-merge this dictionary over `default`.
    ///
    /// Keys missing here, or present as empty strings, take the default's
    /// value. Keys only present here are kept.
    pub fn with_fallback(self, default: &Dictionary) -> Dictionary {
        Dictionary(merge(self.0, &default.0))
    }

    /// Dotted keys of string leaves in `default` that this dictionary lacks
    pub fn missing_keys(&self, default: &Dictionary) -> Vec<String> {
        let mut leaves = Vec::new();
        collect_leaves(&default.0, "", &mut leaves);
        leaves.retain(|key| !matches!(self.get(key), Some(text) if !text.is_empty()));
        leaves.sort();
        leaves
    }
}

fn merge(mut own: Map<String, Value>, default: &Map<String, Value>) -> Map<String, Value> {
    for (key, fallback) in default {
        let merged = match (own.remove(key), fallback) {
            (Some(Value::Object(nested)), Value::Object(fallback_nested)) => {
                Value::Object(merge(nested, fallback_nested))
            }
            (Some(Value::String(text)), _) if text.is_empty() => fallback.clone(),
            (Some(Value::Null), _) | (None, _) => fallback.clone(),
            (Some(value), _) => value,
        };
        own.insert(key.clone(), merged);
    }
    own
}

fn collect_leaves(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) => collect_leaves(nested, &path, out),
            Value::String(_) => out.push(path),
            _ => {}
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
