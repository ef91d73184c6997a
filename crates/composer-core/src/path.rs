//! Index paths from the document root.
//!
//! Nodes never point at their parents; every lookup walks down from the root
//! again, so a path is only meaningful against the document it was taken from.

pub type Path = Vec<usize>;

/// The path of the parent node, or `None` for the root itself.
pub fn parent(path: &[usize]) -> Option<&[usize]> {
    path.split_last().map(|(_, parent)| parent)
}

/// `true` when `ancestor` is a strict prefix of `path`.
pub fn is_ancestor(ancestor: &[usize], path: &[usize]) -> bool {
    ancestor.len() < path.len() && path.starts_with(ancestor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_walks_up_one_level() {
        assert_eq!(parent(&[0, 2, 1]), Some(&[0, 2][..]));
        assert_eq!(parent(&[3]), Some(&[][..]));
        assert_eq!(parent(&[]), None);
    }

    #[test]
    fn ancestor_requires_strict_prefix() {
        assert!(is_ancestor(&[], &[0]));
        assert!(is_ancestor(&[0, 1], &[0, 1, 4]));
        assert!(!is_ancestor(&[0, 1], &[0, 1]));
        assert!(!is_ancestor(&[0, 2], &[0, 1, 4]));
    }
}
