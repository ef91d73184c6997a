use composer_core::{ApplyError, Editor};
use tracing::instrument;

use crate::config::{ConfigError, ShortcutConfig};
use crate::recognizer::{ShortcutMatch, recognize};
use crate::rules::RuleTable;
use crate::transform::transform_block;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
}

/// A key press as delivered by the host. Handlers call
/// [`KeyEvent::prevent_default`] to keep the host from inserting the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            default_prevented: false,
        }
    }

    pub fn char(ch: char) -> Self {
        Self::new(Key::Char(ch))
    }

    pub fn space() -> Self {
        Self::char(' ')
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Space handler. Called before the space is inserted; when a shortcut
/// applies the event is consumed and the paragraph is transformed.
///
/// Returns `Ok(())` on every non-match. Errors only come from the document
/// refusing the edit.
pub fn on_space(
    editor: &mut Editor,
    rules: &RuleTable,
    event: &mut KeyEvent,
    tasks_enabled: bool,
) -> Result<(), ApplyError> {
    let Some(ShortcutMatch {
        rule, delete_count, ..
    }) = recognize(rules, editor.doc(), editor.selection(), tasks_enabled)
    else {
        return Ok(());
    };

    event.prevent_default();
    transform_block(editor, rule, delete_count)
}

pub fn on_key_press(
    editor: &mut Editor,
    rules: &RuleTable,
    event: &mut KeyEvent,
    tasks_enabled: bool,
) -> Result<(), ApplyError> {
    match event.key {
        Key::Char(' ') => on_space(editor, rules, event, tasks_enabled),
        _ => Ok(()),
    }
}

/// Owns the rule table for an editor session.
#[derive(Debug, Clone)]
pub struct ShortcutEngine {
    rules: RuleTable,
}

impl ShortcutEngine {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(RuleTable::standard())
    }

    pub fn from_config(config: &ShortcutConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.rule_table()?))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn recognize<'a>(
        &'a self,
        editor: &Editor,
        tasks_enabled: bool,
    ) -> Option<ShortcutMatch<'a>> {
        recognize(&self.rules, editor.doc(), editor.selection(), tasks_enabled)
    }

    #[instrument(level = "trace", skip(self, editor, event), fields(key = ?event.key))]
    pub fn handle_key_press(
        &self,
        editor: &mut Editor,
        event: &mut KeyEvent,
        tasks_enabled: bool,
    ) -> Result<(), ApplyError> {
        on_key_press(editor, &self.rules, event, tasks_enabled)
    }
}
