use composer_core::{ApplyError, Editor, Op, PathError, Transaction, delete_backward, path};
use tracing::debug;

use crate::rules::ShortcutRule;

/// Deletes the `delete_count` marker characters before the cursor and retypes
/// the enclosing block to the rule's block type, as one transaction.
///
/// Either both edits land or neither does; the pair is a single undo step.
pub fn transform_block(
    editor: &mut Editor,
    rule: &ShortcutRule,
    delete_count: usize,
) -> Result<(), ApplyError> {
    let cursor = editor.selection().focus.clone();
    let block_path = path::parent(&cursor.path)
        .filter(|parent| !parent.is_empty())
        .ok_or_else(|| PathError::TextUnderRoot(cursor.path.clone()))?
        .to_vec();

    let remove_marker = delete_backward(editor.doc(), &cursor, delete_count)?;
    let tx = Transaction::new(vec![
        remove_marker,
        Op::SetBlockType {
            path: block_path.clone(),
            block_type: rule.block_type,
        },
    ])
    .source(format!("shortcut:{}", rule.block_type));

    editor.apply(tx)?;
    debug!(
        trigger = %rule.trigger,
        block_type = %rule.block_type,
        path = ?block_path,
        "applied block shortcut"
    );
    Ok(())
}
