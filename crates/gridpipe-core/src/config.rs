//! Step configuration document.
//!
//! A [`StepConfig`] is the key-value document handed to a pipeline step by
//! its host. It is loaded once, resolved against a
//! [`StepContract`](crate::contract::StepContract), and never mutated during
//! the run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, StepError};

/// Immutable key-value configuration for one step run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepConfig {
    values: Map<String, Value>,
}

impl StepConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::from_value(value)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a configuration from an already-parsed JSON value
    ///
    /// The document must be a JSON object; anything else is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(StepError::Validation(format!(
                "Configuration document must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Look up a raw option value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether an option is present (including explicit `null`)
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Look up an option that must be a string if present
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(StepError::InvalidOptionType {
                option: key.to_string(),
                expected: "string",
            }),
        }
    }

    /// Look up an option that must be an array of strings if present
    pub fn get_str_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let items = match self.values.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(StepError::InvalidOptionType {
                    option: key.to_string(),
                    expected: "array of strings",
                })
            }
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => out.push(s.clone()),
                _ => {
                    return Err(StepError::InvalidOptionType {
                        option: key.to_string(),
                        expected: "array of strings",
                    })
                }
            }
        }
        Ok(Some(out))
    }

    /// Insert a default for an absent option.
    ///
    /// Used by the contract while resolving; an explicitly supplied value
    /// (even `null`) is never overwritten.
    pub(crate) fn insert_default(&mut self, key: &str, value: Value) {
        if !self.values.contains_key(key) {
            self.values.insert(key.to_string(), value);
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
