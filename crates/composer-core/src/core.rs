use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::document::{BlockNode, Document, Node, Point, Selection, TextNode};
use crate::error::{ApplyError, PathError};
use crate::ops::{Op, Transaction};

#[derive(Debug, Clone)]
pub struct UndoRecord {
    pub inverse_ops: Vec<Op>,
    pub selection_before: Selection,
    pub selection_after: Selection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub max_undo: usize,
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(s).map(Self::with_defaults)
    }

    fn with_defaults(mut self) -> Self {
        if self.max_undo == 0 {
            self.max_undo = 200;
        }
        self
    }
}

pub struct Editor {
    doc: Document,
    selection: Selection,
    config: EditorConfig,
    undo_stack: Vec<UndoRecord>,
    redo_stack: Vec<UndoRecord>,
}

impl Editor {
    pub fn new(doc: Document, selection: Selection) -> Self {
        Self::with_config(doc, selection, EditorConfig::default())
    }

    pub fn with_config(doc: Document, selection: Selection, config: EditorConfig) -> Self {
        Self {
            doc,
            selection,
            config: config.with_defaults(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// A document holding a single empty paragraph with the cursor inside it.
    pub fn with_empty_paragraph() -> Self {
        let doc = Document::new(vec![BlockNode::paragraph("")]);
        let selection = Selection::collapsed(Point::new(vec![0, 0], 0));
        Self::new(doc, selection)
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo(&mut self) -> bool {
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };

        let redo_ops = match self.apply_ops_atomic(&record.inverse_ops) {
            Ok(ops) => ops,
            Err(err) => {
                debug!(%err, "undo record no longer applies; dropping it");
                return false;
            }
        };
        trace!(ops = redo_ops.len(), "undo");

        self.selection = record.selection_before.clone();
        self.redo_stack.push(UndoRecord {
            inverse_ops: redo_ops,
            selection_before: record.selection_before,
            selection_after: record.selection_after,
        });
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(record) = self.redo_stack.pop() else {
            return false;
        };

        let undo_ops = match self.apply_ops_atomic(&record.inverse_ops) {
            Ok(ops) => ops,
            Err(err) => {
                debug!(%err, "redo record no longer applies; dropping it");
                return false;
            }
        };
        trace!(ops = undo_ops.len(), "redo");

        self.selection = record.selection_after.clone();
        self.undo_stack.push(UndoRecord {
            inverse_ops: undo_ops,
            selection_before: record.selection_before,
            selection_after: record.selection_after,
        });
        true
    }

    /// Applies every op of `tx` or none of them. A failing op leaves both the
    /// document and the selection exactly as they were.
    pub fn apply(&mut self, tx: Transaction) -> Result<(), ApplyError> {
        let selection_before = self.selection.clone();

        let mut doc = self.doc.clone();
        let mut selection = self.selection.clone();
        let mut inverse_ops: Vec<Op> = Vec::with_capacity(tx.ops.len());
        for op in tx.ops.iter().cloned() {
            inverse_ops.push(apply_op_to(&mut doc, &mut selection, op)?);
        }
        inverse_ops.reverse();

        if let Some(sel) = tx.selection_after {
            selection = sel;
        }

        debug!(
            ops = tx.ops.len(),
            source = tx.meta.source.as_deref().unwrap_or("unknown"),
            "applied transaction"
        );

        self.doc = doc;
        self.selection = selection;
        self.undo_stack.push(UndoRecord {
            inverse_ops,
            selection_before,
            selection_after: self.selection.clone(),
        });
        self.redo_stack.clear();
        if self.undo_stack.len() > self.config.max_undo {
            self.undo_stack.remove(0);
        }

        Ok(())
    }

    /// Default character insertion: types `text` at a collapsed cursor, or
    /// replaces the selected range when both ends sit in the same leaf.
    pub fn insert_text(&mut self, text: &str) -> Result<(), ApplyError> {
        let Selection { anchor, focus } = &self.selection;
        if anchor.path != focus.path {
            return Err(PathError::NotText(focus.path.clone()).into());
        }

        let path = focus.path.clone();
        let start = anchor.offset.min(focus.offset);
        let end = anchor.offset.max(focus.offset);

        let mut ops = Vec::with_capacity(2);
        if start < end {
            ops.push(Op::RemoveText {
                path: path.clone(),
                range: start..end,
            });
        }
        ops.push(Op::InsertText {
            path: path.clone(),
            offset: start,
            text: text.to_string(),
        });

        let caret = Point::new(path, start + text.len());
        self.apply(
            Transaction::new(ops)
                .selection_after(Selection::collapsed(caret))
                .source("core:insert_text"),
        )
    }

    fn apply_ops_atomic(&mut self, ops: &[Op]) -> Result<Vec<Op>, ApplyError> {
        let mut doc = self.doc.clone();
        let mut selection = self.selection.clone();
        let mut inverse: Vec<Op> = Vec::with_capacity(ops.len());
        for op in ops.iter().cloned() {
            inverse.push(apply_op_to(&mut doc, &mut selection, op)?);
        }
        inverse.reverse();

        self.doc = doc;
        self.selection = selection;
        Ok(inverse)
    }
}

/// Builds the op that removes the `distance` characters right before `point`.
///
/// The deletion never leaves the leaf `point` sits in; asking for more
/// characters than precede the point is an error.
pub fn delete_backward(doc: &Document, point: &Point, distance: usize) -> Result<Op, ApplyError> {
    let text = doc
        .text(&point.path)
        .ok_or_else(|| PathError::NotText(point.path.clone()))?;
    let before = text
        .text
        .get(..point.offset)
        .ok_or_else(|| ApplyError::InvalidOffset {
            path: point.path.clone(),
            offset: point.offset,
            len: text.text.len(),
        })?;

    let start = match distance {
        0 => point.offset,
        n => before
            .char_indices()
            .rev()
            .nth(n - 1)
            .map(|(ix, _)| ix)
            .ok_or_else(|| ApplyError::DistanceOutOfRange {
                path: point.path.clone(),
                offset: point.offset,
                distance,
            })?,
    };

    Ok(Op::RemoveText {
        path: point.path.clone(),
        range: start..point.offset,
    })
}

fn apply_op_to(doc: &mut Document, selection: &mut Selection, op: Op) -> Result<Op, ApplyError> {
    match op {
        Op::InsertText { path, offset, text } => {
            let text_node = text_mut(doc, &path)?;
            check_char_boundary(&path, &text_node.text, offset)?;
            text_node.text.insert_str(offset, &text);
            transform_selection_insert_text(selection, &path, offset, text.len());
            Ok(Op::RemoveText {
                range: offset..offset + text.len(),
                path,
            })
        }
        Op::RemoveText { path, range } => {
            let text_node = text_mut(doc, &path)?;
            check_char_boundary(&path, &text_node.text, range.start)?;
            check_char_boundary(&path, &text_node.text, range.end)?;
            let Range { start, end } = range;
            if start >= end {
                return Ok(Op::InsertText {
                    path,
                    offset: start,
                    text: String::new(),
                });
            }
            let removed = text_node.text[start..end].to_string();
            text_node.text.replace_range(start..end, "");
            transform_selection_remove_text(selection, &path, start..end);
            Ok(Op::InsertText {
                path,
                offset: start,
                text: removed,
            })
        }
        Op::InsertNode { path, node } => {
            insert_node(doc, &path, node)?;
            transform_selection_insert_node(selection, &path);
            Ok(Op::RemoveNode { path })
        }
        Op::RemoveNode { path } => {
            let removed = remove_node(doc, &path)?;
            transform_selection_remove_node(selection, &path);
            Ok(Op::InsertNode {
                path,
                node: removed,
            })
        }
        Op::SetBlockType { path, block_type } => {
            let block = block_mut(doc, &path)?;
            let old = std::mem::replace(&mut block.block_type, block_type);
            Ok(Op::SetBlockType {
                path,
                block_type: old,
            })
        }
    }
}

fn check_char_boundary(path: &[usize], text: &str, offset: usize) -> Result<(), ApplyError> {
    if offset <= text.len() && text.is_char_boundary(offset) {
        return Ok(());
    }
    Err(ApplyError::InvalidOffset {
        path: path.to_vec(),
        offset,
        len: text.len(),
    })
}

fn transform_selection_insert_text(
    selection: &mut Selection,
    path: &[usize],
    offset: usize,
    len: usize,
) {
    for point in [&mut selection.anchor, &mut selection.focus] {
        if point.path == path && point.offset >= offset {
            point.offset = point.offset.saturating_add(len);
        }
    }
}

fn transform_selection_remove_text(selection: &mut Selection, path: &[usize], range: Range<usize>) {
    let removed_len = range.end.saturating_sub(range.start);
    for point in [&mut selection.anchor, &mut selection.focus] {
        if point.path != path || point.offset <= range.start {
            continue;
        }
        if point.offset >= range.end {
            point.offset = point.offset.saturating_sub(removed_len);
        } else {
            point.offset = range.start;
        }
    }
}

fn transform_selection_insert_node(selection: &mut Selection, path: &[usize]) {
    let Some((&index, parent_path)) = path.split_last() else {
        return;
    };

    for point in [&mut selection.anchor, &mut selection.focus] {
        if !crate::path::is_ancestor(parent_path, &point.path) {
            continue;
        }
        let depth = parent_path.len();
        if point.path[depth] >= index {
            point.path[depth] += 1;
        }
    }
}

fn transform_selection_remove_node(selection: &mut Selection, path: &[usize]) {
    let Some((&index, parent_path)) = path.split_last() else {
        return;
    };

    for point in [&mut selection.anchor, &mut selection.focus] {
        if !crate::path::is_ancestor(parent_path, &point.path) {
            continue;
        }
        let depth = parent_path.len();
        let ix = point.path[depth];
        if ix > index {
            point.path[depth] = ix - 1;
        } else if ix == index {
            // Point was inside the removed subtree; park it on the previous sibling.
            point.path.truncate(depth + 1);
            point.path[depth] = index.saturating_sub(1);
            point.offset = 0;
        }
    }
}

fn block_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Result<&'a mut BlockNode, PathError> {
    let Some((&first, rest)) = path.split_first() else {
        return Err(PathError::Empty);
    };

    let len = doc.children.len();
    let mut block = doc
        .children
        .get_mut(first)
        .ok_or_else(|| PathError::OutOfBounds {
            path: path.to_vec(),
            depth: 0,
            index: first,
            len,
        })?;

    for (depth, &ix) in rest.iter().enumerate() {
        let len = block.children.len();
        block = match block.children.get_mut(ix) {
            Some(Node::Block(child)) => child,
            Some(Node::Text(_)) => return Err(PathError::NotBlock(path.to_vec())),
            None => {
                return Err(PathError::OutOfBounds {
                    path: path.to_vec(),
                    depth: depth + 1,
                    index: ix,
                    len,
                });
            }
        };
    }
    Ok(block)
}

fn text_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Result<&'a mut TextNode, PathError> {
    let Some((&index, parent_path)) = path.split_last() else {
        return Err(PathError::Empty);
    };
    if parent_path.is_empty() {
        return Err(PathError::TextUnderRoot(path.to_vec()));
    }

    let parent = block_mut(doc, parent_path).map_err(|err| match err {
        PathError::NotBlock(_) => PathError::NotContainer {
            path: path.to_vec(),
            depth: parent_path.len() - 1,
        },
        other => other,
    })?;
    let len = parent.children.len();
    match parent.children.get_mut(index) {
        Some(Node::Text(t)) => Ok(t),
        Some(Node::Block(_)) => Err(PathError::NotText(path.to_vec())),
        None => Err(PathError::OutOfBounds {
            path: path.to_vec(),
            depth: parent_path.len(),
            index,
            len,
        }),
    }
}

fn insert_node(doc: &mut Document, path: &[usize], node: Node) -> Result<(), PathError> {
    let Some((&index, parent_path)) = path.split_last() else {
        return Err(PathError::Empty);
    };

    if parent_path.is_empty() {
        let Node::Block(block) = node else {
            return Err(PathError::TextUnderRoot(path.to_vec()));
        };
        if index > doc.children.len() {
            return Err(PathError::OutOfBounds {
                path: path.to_vec(),
                depth: 0,
                index,
                len: doc.children.len(),
            });
        }
        doc.children.insert(index, block);
        return Ok(());
    }

    let parent = block_mut(doc, parent_path)?;
    if index > parent.children.len() {
        return Err(PathError::OutOfBounds {
            path: path.to_vec(),
            depth: parent_path.len(),
            index,
            len: parent.children.len(),
        });
    }
    parent.children.insert(index, node);
    Ok(())
}

fn remove_node(doc: &mut Document, path: &[usize]) -> Result<Node, PathError> {
    let Some((&index, parent_path)) = path.split_last() else {
        return Err(PathError::Empty);
    };

    let (children_len, depth) = if parent_path.is_empty() {
        (doc.children.len(), 0)
    } else {
        (block_mut(doc, parent_path)?.children.len(), parent_path.len())
    };
    if index >= children_len {
        return Err(PathError::OutOfBounds {
            path: path.to_vec(),
            depth,
            index,
            len: children_len,
        });
    }

    if parent_path.is_empty() {
        Ok(Node::Block(doc.children.remove(index)))
    } else {
        Ok(block_mut(doc, parent_path)?.children.remove(index))
    }
}
