//! Configuration contract - the declared option surface of a step.
//!
//! A step declares the options it recognizes as a static schema: name,
//! required flag, and an optional default. The contract is resolved eagerly
//! against the supplied [`StepConfig`] before the step body runs, so a
//! missing required option or a failed validation predicate surfaces before
//! any remote call is made.

use serde_json::Value;

use crate::config::StepConfig;
use crate::error::{Result, StepError};

/// One recognized configuration option
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Option name as it appears in the configuration document
    pub name: &'static str,
    /// Whether the option must be supplied by the host
    pub required: bool,
    /// Default applied when an optional option is absent
    pub default: Option<Value>,
}

impl OptionSpec {
    /// Declare a required option
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            default: None,
        }
    }

    /// Declare an optional option with no default
    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            default: None,
        }
    }

    /// Declare an optional option with a default value
    pub fn with_default(name: &'static str, default: Value) -> Self {
        Self {
            name,
            required: false,
            default: Some(default),
        }
    }
}

/// Validation predicate run over the fully populated configuration
pub type Validator = fn(&StepConfig) -> std::result::Result<(), String>;

/// The declared option surface of a step plus its validation hook
pub struct StepContract {
    options: Vec<OptionSpec>,
    validator: Option<Validator>,
}

impl StepContract {
    /// Create a contract from a static option schema
    pub fn new(options: Vec<OptionSpec>) -> Self {
        Self {
            options,
            validator: None,
        }
    }

    /// Attach a validation predicate run after defaults are applied
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// The declared options, in declaration order
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Resolve a supplied configuration against this contract.
    ///
    /// Checks required options, fills in defaults for absent optional
    /// options, then runs the validation predicate. Any failure is returned
    /// as an error; the caller is expected to treat it as fatal.
    pub fn resolve(&self, mut config: StepConfig) -> Result<StepConfig> {
        for option in &self.options {
            // An explicit `null` counts as absent; wrong types are caught by
            // the typed getters when the step reads the option.
            if option.required
                && matches!(config.get(option.name), None | Some(Value::Null))
            {
                return Err(StepError::MissingOption(option.name.to_string()));
            }
            if let Some(default) = &option.default {
                config.insert_default(option.name, default.clone());
            }
        }

        if let Some(validator) = self.validator {
            validator(&config).map_err(StepError::Validation)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> StepContract {
        StepContract::new(vec![
            OptionSpec::required("workbookId"),
            OptionSpec::with_default("titleRegex", Value::String(".*".to_string())),
            OptionSpec::optional("columns"),
        ])
    }

    #[test]
    fn test_missing_required_option() {
        let config = StepConfig::from_json(r#"{"titleRegex": "^Jan$"}"#).unwrap();
        let err = contract().resolve(config).unwrap_err();
        assert!(matches!(err, StepError::MissingOption(name) if name == "workbookId"));
    }

    #[test]
    fn test_null_required_option_is_missing() {
        let config = StepConfig::from_json(r#"{"workbookId": null}"#).unwrap();
        assert!(contract().resolve(config).is_err());
    }

    #[test]
    fn test_default_applied_when_absent() {
        let config = StepConfig::from_json(r#"{"workbookId": "wb"}"#).unwrap();
        let resolved = contract().resolve(config).unwrap();
        assert_eq!(resolved.get_str("titleRegex").unwrap(), Some(".*"));
    }

    #[test]
    fn test_supplied_value_wins_over_default() {
        let config =
            StepConfig::from_json(r#"{"workbookId": "wb", "titleRegex": "^Feb$"}"#).unwrap();
        let resolved = contract().resolve(config).unwrap();
        assert_eq!(resolved.get_str("titleRegex").unwrap(), Some("^Feb$"));
    }

    #[test]
    fn test_optional_without_default_stays_absent() {
        let config = StepConfig::from_json(r#"{"workbookId": "wb"}"#).unwrap();
        let resolved = contract().resolve(config).unwrap();
        assert_eq!(resolved.get("columns"), None);
    }

    #[test]
    fn test_validator_failure() {
        let config = StepConfig::from_json(r#"{"workbookId": "wb"}"#).unwrap();
        let err = contract()
            .with_validator(|_| Err("columns requires columnNames".to_string()))
            .resolve(config)
            .unwrap_err();
        assert!(matches!(err, StepError::Validation(_)));
    }

    #[test]
    fn test_validator_sees_defaults() {
        let config = StepConfig::from_json(r#"{"workbookId": "wb"}"#).unwrap();
        let resolved = contract()
            .with_validator(|c| {
                if c.get_str("titleRegex").ok().flatten().is_some() {
                    Ok(())
                } else {
                    Err("default not applied".to_string())
                }
            })
            .resolve(config)
            .unwrap();
        assert_eq!(resolved.get_str("workbookId").unwrap(), Some("wb"));
    }
}
