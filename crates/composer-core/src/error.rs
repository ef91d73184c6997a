use thiserror::Error;

use crate::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("path {path:?} out of bounds at depth {depth}: {index} >= {len}")]
    OutOfBounds {
        path: Path,
        depth: usize,
        index: usize,
        len: usize,
    },
    #[error("path {path:?} descends through a text node at depth {depth}")]
    NotContainer { path: Path, depth: usize },
    #[error("expected a text node at {0:?}")]
    NotText(Path),
    #[error("expected a block node at {0:?}")]
    NotBlock(Path),
    #[error("text nodes cannot be children of the root ({0:?})")]
    TextUnderRoot(Path),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    #[error("offset {offset} is not a char boundary in text of length {len} at {path:?}")]
    InvalidOffset { path: Path, offset: usize, len: usize },
    #[error("cannot delete {distance} characters before offset {offset} at {path:?}")]
    DistanceOutOfRange {
        path: Path,
        offset: usize,
        distance: usize,
    },
}
