use composer_core::{BlockType, Document, NodeRef, Path, Selection, path};
use tracing::trace;

use crate::rules::{RuleTable, ShortcutRule};

/// Markers are only looked for in the first few characters of a leaf.
///
/// This is a fixed window rather than the longest configured trigger, so a
/// rule with a longer trigger never fires.
pub const MAX_MARKER_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ShortcutMatch<'r> {
    pub rule: &'r ShortcutRule,
    /// The paragraph that will be retyped.
    pub block_path: Path,
    /// Characters of marker text sitting before the cursor.
    pub delete_count: usize,
}

/// Decides whether a space typed at the current cursor should turn the
/// enclosing paragraph into another block. Never mutates anything.
pub fn recognize<'r>(
    rules: &'r RuleTable,
    doc: &Document,
    selection: &Selection,
    tasks_enabled: bool,
) -> Option<ShortcutMatch<'r>> {
    if !selection.is_collapsed() {
        trace!("selection is not collapsed");
        return None;
    }
    let point = &selection.anchor;

    let Some(leaf) = doc.text(&point.path) else {
        trace!(path = ?point.path, "cursor is not in a text leaf");
        return None;
    };

    let Some(prefix) = leaf.text.get(..point.offset) else {
        trace!(offset = point.offset, "cursor is not on a char boundary");
        return None;
    };
    let marker_len = prefix.chars().count();
    if !(1..=MAX_MARKER_LEN).contains(&marker_len) {
        trace!(marker_len, "cursor outside the marker window");
        return None;
    }

    let block_path = path::parent(&point.path)?;
    if doc.node(block_path)?.block_type() != Some(BlockType::Paragraph) {
        trace!(path = ?block_path, "enclosing block is not a paragraph");
        return None;
    }

    let Some(rule) = rules.lookup(prefix, tasks_enabled) else {
        trace!(prefix, "no shortcut for prefix");
        return None;
    };

    let container = doc.parent(block_path)?;
    let placement_ok = match container {
        NodeRef::Root(_) => true,
        NodeRef::Block(block) => rule.allows_container(block.block_type),
        NodeRef::Text(_) => false,
    };
    if !placement_ok {
        trace!(
            trigger = %rule.trigger,
            container = ?container.block_type(),
            "shortcut not allowed in this container"
        );
        return None;
    }

    Some(ShortcutMatch {
        rule,
        block_path: block_path.to_vec(),
        delete_count: marker_len,
    })
}
