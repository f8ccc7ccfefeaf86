//! Rule configuration types.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a rule's configuration from supplied values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The supplied value does not match the rule's configuration shape.
    #[error("invalid configuration for rule `{rule}`: {message}")]
    Invalid {
        /// Identifier of the rule being configured.
        rule: String,
        /// What was wrong with the value.
        message: String,
    },
    /// The rule does not accept configuration at all.
    #[error("rule `{rule}` does not accept configuration")]
    NotConfigurable {
        /// Identifier of the rule being configured.
        rule: String,
    },
}

/// Configuration for rules whose only knob is their severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeverityConfig {
    /// Severity reported for every violation of the rule.
    #[serde(default = "default_severity")]
    pub severity: Severity,
}

fn default_severity() -> Severity {
    Severity::Warning
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            severity: default_severity(),
        }
    }
}

impl SeverityConfig {
    /// Creates a configuration with the given severity.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self { severity }
    }

    /// Replaces this configuration from an opaque TOML value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the value does not deserialize
    /// into a severity configuration.
    pub fn apply(&mut self, rule: &str, value: &toml::Value) -> Result<(), ConfigError> {
        *self = value
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Invalid {
                rule: rule.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// Builds the TOML value forcing a severity, as the harness passes to
/// severity-configurable rules.
#[must_use]
pub fn severity_value(severity: Severity) -> toml::Value {
    let mut table = toml::value::Table::new();
    table.insert(
        "severity".to_string(),
        toml::Value::String(severity.to_string()),
    );
    toml::Value::Table(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_severity_is_warning() {
        assert_eq!(SeverityConfig::default().severity, Severity::Warning);
    }

    #[test]
    fn apply_accepts_a_severity_table() {
        let mut config = SeverityConfig::default();
        config
            .apply("demo", &severity_value(Severity::Error))
            .unwrap_or_else(|e| panic!("apply: {e}"));
        assert_eq!(config.severity, Severity::Error);
    }

    #[test]
    fn apply_rejects_unknown_keys() {
        let mut table = toml::value::Table::new();
        table.insert("severty".to_string(), toml::Value::String("error".into()));
        let mut config = SeverityConfig::default();
        let err = config.apply("demo", &toml::Value::Table(table));
        assert!(matches!(err, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn apply_rejects_bad_severity_names() {
        let mut table = toml::value::Table::new();
        table.insert("severity".to_string(), toml::Value::String("fatal".into()));
        let mut config = SeverityConfig::default();
        assert!(config.apply("demo", &toml::Value::Table(table)).is_err());
    }
}
