use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::{RuleTable, RuleTableError, ShortcutRule, standard_rules};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid shortcut config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rules(#[from] RuleTableError),
}

fn default_rules() -> Vec<ShortcutRule> {
    standard_rules()
}

/// Editor-level shortcut configuration. The tasks capability is not part of
/// it; hosts pass that flag on every key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<ShortcutRule>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl ShortcutConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn rule_table(&self) -> Result<RuleTable, RuleTableError> {
        RuleTable::new(self.rules.iter().cloned())
    }
}
