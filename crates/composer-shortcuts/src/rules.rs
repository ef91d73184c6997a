use std::collections::HashMap;

use composer_core::BlockType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::recognizer::MAX_MARKER_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleTableError {
    #[error("duplicate shortcut trigger: {0:?}")]
    DuplicateTrigger(String),
    #[error("shortcut trigger for {0} is empty")]
    EmptyTrigger(BlockType),
}

/// Capability a rule depends on. Closed gates make the rule invisible to
/// lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGate {
    #[default]
    Always,
    Tasks,
}

impl FeatureGate {
    pub fn is_open(self, tasks_enabled: bool) -> bool {
        match self {
            FeatureGate::Always => true,
            FeatureGate::Tasks => tasks_enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutRule {
    pub trigger: String,
    pub block_type: BlockType,
    /// Block types allowed as the grandparent of the new block. The root is
    /// always allowed and never listed.
    #[serde(default)]
    pub valid_in: Vec<BlockType>,
    #[serde(default)]
    pub gate: FeatureGate,
}

impl ShortcutRule {
    pub fn new(trigger: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            trigger: trigger.into(),
            block_type,
            valid_in: Vec::new(),
            gate: FeatureGate::Always,
        }
    }

    pub fn valid_in(mut self, block_types: impl IntoIterator<Item = BlockType>) -> Self {
        self.valid_in = block_types.into_iter().collect();
        self
    }

    pub fn gate(mut self, gate: FeatureGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn allows_container(&self, block_type: BlockType) -> bool {
        self.valid_in.contains(&block_type)
    }
}

const LIST_CONTAINERS: [BlockType; 3] = [
    BlockType::BulletListItem,
    BlockType::NumberListItem,
    BlockType::TodoItem,
];

pub fn standard_rules() -> Vec<ShortcutRule> {
    vec![
        ShortcutRule::new(">", BlockType::Quote).valid_in(LIST_CONTAINERS),
        ShortcutRule::new("-", BlockType::BulletListItem).valid_in(LIST_CONTAINERS),
        ShortcutRule::new("*", BlockType::BulletListItem).valid_in(LIST_CONTAINERS),
        ShortcutRule::new("1.", BlockType::NumberListItem).valid_in(LIST_CONTAINERS),
        ShortcutRule::new("[]", BlockType::TodoItem)
            .valid_in(LIST_CONTAINERS)
            .gate(FeatureGate::Tasks),
    ]
}

/// Trigger text to rule, built once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, ShortcutRule>,
}

impl RuleTable {
    pub fn new(rules: impl IntoIterator<Item = ShortcutRule>) -> Result<Self, RuleTableError> {
        let mut table = Self::default();
        for rule in rules {
            if rule.trigger.is_empty() {
                return Err(RuleTableError::EmptyTrigger(rule.block_type));
            }
            if table.rules.contains_key(&rule.trigger) {
                return Err(RuleTableError::DuplicateTrigger(rule.trigger));
            }
            if rule.trigger.chars().count() > MAX_MARKER_LEN {
                warn!(
                    trigger = %rule.trigger,
                    max = MAX_MARKER_LEN,
                    "shortcut trigger is longer than the marker window and will never match"
                );
            }
            table.rules.insert(rule.trigger.clone(), rule);
        }
        Ok(table)
    }

    pub fn standard() -> Self {
        Self::new(standard_rules()).expect("standard shortcut rules must be valid")
    }

    /// Exact, case-sensitive match. Rules behind a closed gate are reported
    /// as absent.
    pub fn lookup(&self, prefix: &str, tasks_enabled: bool) -> Option<&ShortcutRule> {
        self.rules
            .get(prefix)
            .filter(|rule| rule.gate.is_open(tasks_enabled))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
