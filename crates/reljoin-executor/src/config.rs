//! Join evaluator configuration
//!
//! Configuration is optional: every field has a default, and a TOML document
//! only needs the keys it wants to change, e.g.
//!
//! ```toml
//! [join]
//! strategy = "hash"
//! parallel_threshold = 50000
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::ExecutorError;

/// How match sets are computed.
///
/// Every strategy produces the same output; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Hash join for equi-join conditions, nested loop otherwise
    #[default]
    Auto,
    /// Always evaluate every (left, right) pair
    NestedLoop,
    /// Prefer a hash index; falls back to nested loop when the condition has
    /// no usable equality between a left and a right column
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinConfig {
    #[serde(default)]
    pub strategy: JoinStrategy,

    /// Left row count at which match-set construction is split across worker
    /// threads. `None` uses the hardware-derived default.
    #[serde(default)]
    pub parallel_threshold: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    join: JoinConfig,
}

impl JoinConfig {
    /// Parse the `[join]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ExecutorError> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| ExecutorError::InvalidConfig(format!("Failed to parse config: {}", e)))?;
        Ok(file.join)
    }

    pub fn with_strategy(mut self, strategy: JoinStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = Some(threshold);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JoinConfig::default();
        assert_eq!(config.strategy, JoinStrategy::Auto);
        assert_eq!(config.parallel_threshold, None);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_str = r#"
[join]
strategy = "nested_loop"
parallel_threshold = 5000
"#;
        let config = JoinConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.strategy, JoinStrategy::NestedLoop);
        assert_eq!(config.parallel_threshold, Some(5000));
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = JoinConfig::from_toml_str("").unwrap();
        assert_eq!(config, JoinConfig::default());
    }

    #[test]
    fn test_invalid_strategy() {
        let err = JoinConfig::from_toml_str("[join]\nstrategy = \"merge\"\n").unwrap_err();
        assert!(matches!(err, ExecutorError::InvalidConfig(_)));
    }
}
