//! Lookup configuration shared by sources and query builders.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Placeholder marking the variable part of a temporary-account pattern.
pub const TEMP_NAME_PLACEHOLDER: &str = "$1";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid actor query config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("temporary account pattern '{pattern}' must contain '$1' exactly once")]
    InvalidPattern { pattern: String },

    #[error("max_limit must be greater than zero")]
    ZeroMaxLimit,
}

///
/// ActorQueryConfig
///
/// `temp_name_patterns` lists the name shapes reserved for temporary
/// accounts, e.g. `~$1` or `~2$1`. `max_limit` caps the row limit a
/// builder may request.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorQueryConfig {
    pub temp_name_patterns: Vec<String>,
    pub max_limit: Option<u32>,
}

impl ActorQueryConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == Some(0) {
            return Err(ConfigError::ZeroMaxLimit);
        }
        for pattern in &self.temp_name_patterns {
            TempNamePattern::parse(pattern)?;
        }

        Ok(())
    }

    /// Parsed temporary-account patterns; malformed entries are skipped.
    pub(crate) fn temp_patterns(&self) -> impl Iterator<Item = TempNamePattern> + '_ {
        self.temp_name_patterns
            .iter()
            .filter_map(|pattern| TempNamePattern::parse(pattern).ok())
    }
}

///
/// TempNamePattern
///
/// A temporary-account pattern split around its `$1` placeholder.
/// Names match as `LIKE 'prefix%suffix'`, so `*$1*` needs at least two
/// characters.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TempNamePattern {
    pub(crate) prefix: String,
    pub(crate) suffix: String,
}

impl TempNamePattern {
    pub(crate) fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
        };

        let (prefix, suffix) = pattern.split_once(TEMP_NAME_PLACEHOLDER).ok_or_else(invalid)?;
        if suffix.contains(TEMP_NAME_PLACEHOLDER) {
            return Err(invalid());
        }

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }
}
