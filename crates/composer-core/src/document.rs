use serde::{Deserialize, Serialize};

use crate::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Paragraph,
    Quote,
    BulletListItem,
    NumberListItem,
    TodoItem,
}

impl BlockType {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Paragraph => "paragraph",
            BlockType::Quote => "quote",
            BlockType::BulletListItem => "bullet_list_item",
            BlockType::NumberListItem => "number_list_item",
            BlockType::TodoItem => "todo_item",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root container. Only blocks may sit directly under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    #[serde(default)]
    pub children: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Block(BlockNode),
    Text(TextNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::new(text))
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Block(BlockNode::paragraph(text))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub block_type: BlockType,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl BlockNode {
    pub fn new(block_type: BlockType, children: Vec<Node>) -> Self {
        Self {
            block_type,
            children,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockType::Paragraph, vec![Node::text(text)])
    }

    /// Concatenated text of every leaf below this block, in document order.
    pub fn text_content(&self) -> String {
        fn walk(children: &[Node], out: &mut String) {
            for child in children {
                match child {
                    Node::Text(t) => out.push_str(&t.text),
                    Node::Block(b) => walk(&b.children, out),
                }
            }
        }

        let mut out = String::new();
        walk(&self.children, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Borrowed view of whatever a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Root(&'a Document),
    Block(&'a BlockNode),
    Text(&'a TextNode),
}

impl<'a> NodeRef<'a> {
    pub fn is_root(&self) -> bool {
        matches!(self, NodeRef::Root(_))
    }

    pub fn as_block(&self) -> Option<&'a BlockNode> {
        match self {
            NodeRef::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a TextNode> {
        match self {
            NodeRef::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn block_type(&self) -> Option<BlockType> {
        self.as_block().map(|b| b.block_type)
    }
}

impl Document {
    pub fn new(children: Vec<BlockNode>) -> Self {
        Self { children }
    }

    /// Resolves `path` against the tree. The empty path is the root.
    pub fn node(&self, path: &[usize]) -> Option<NodeRef<'_>> {
        let Some((&first, rest)) = path.split_first() else {
            return Some(NodeRef::Root(self));
        };

        let mut block = self.children.get(first)?;
        for (depth, &ix) in rest.iter().enumerate() {
            match block.children.get(ix)? {
                Node::Block(child) => block = child,
                Node::Text(t) if depth + 1 == rest.len() => return Some(NodeRef::Text(t)),
                Node::Text(_) => return None,
            }
        }
        Some(NodeRef::Block(block))
    }

    pub fn parent(&self, path: &[usize]) -> Option<NodeRef<'_>> {
        self.node(crate::path::parent(path)?)
    }

    pub fn text(&self, path: &[usize]) -> Option<&TextNode> {
        self.node(path)?.as_text()
    }

    pub fn first_text_point(&self) -> Option<Point> {
        fn walk(children: &[Node], path: &mut Path) -> Option<Point> {
            for (ix, node) in children.iter().enumerate() {
                path.push(ix);
                let found = match node {
                    Node::Text(_) => Some(Point::new(path.clone(), 0)),
                    Node::Block(b) => walk(&b.children, path),
                };
                path.pop();
                if found.is_some() {
                    return found;
                }
            }
            None
        }

        let mut path = Path::new();
        for (ix, block) in self.children.iter().enumerate() {
            path.push(ix);
            if let Some(point) = walk(&block.children, &mut path) {
                return Some(point);
            }
            path.pop();
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: Path, offset: usize) -> Self {
        Self { path, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}
