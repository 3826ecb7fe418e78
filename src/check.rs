//! Invariant validators and a textual tree dump.
//!
//! These are read-only traversals meant for the test suite and for
//! debugging sessions; none of them run on the mutation paths.

use std::fmt;

use crate::{is_red, Ebony, Link, NodeColor};

impl<K: Ord, V> Ebony<K, V> {
    /// Checks that every root-to-leaf path crosses the same number of
    /// black nodes.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        black_height(&self.root).is_some()
    }

    /// Checks that the root is black and no red node has a red child.
    #[must_use]
    pub fn has_valid_coloring(&self) -> bool {
        !is_red(&self.root) && no_red_red(&self.root)
    }

    /// Checks the search-tree ordering across whole subtrees, not just
    /// adjacent parent/child pairs.
    #[must_use]
    pub fn is_valid_ordering(&self) -> bool {
        ordered(&self.root, None, None)
    }
}

fn black_height<K, V>(link: &Link<K, V>) -> Option<usize> {
    let Some(node) = link else {
        return Some(0);
    };

    let left = black_height(&node.left)?;
    let right = black_height(&node.right)?;
    if left != right {
        return None;
    }

    match node.color {
        NodeColor::Black => Some(left + 1),
        NodeColor::Red => Some(left),
    }
}

fn no_red_red<K, V>(link: &Link<K, V>) -> bool {
    let Some(node) = link else {
        return true;
    };

    if matches!(node.color, NodeColor::Red) && (is_red(&node.left) || is_red(&node.right)) {
        return false;
    }

    no_red_red(&node.left) && no_red_red(&node.right)
}

fn ordered<'a, K: Ord, V>(link: &'a Link<K, V>, low: Option<&'a K>, high: Option<&'a K>) -> bool {
    let Some(node) = link else {
        return true;
    };

    if low.is_some_and(|bound| node.key <= *bound) || high.is_some_and(|bound| node.key >= *bound) {
        return false;
    }

    ordered(&node.left, low, Some(&node.key)) && ordered(&node.right, Some(&node.key), high)
}

/// Sideways tree graph, right subtree on top. One `R:key:value` or
/// `B:key:value` line per node. Debugging aid only; the exact layout is
/// not a stable format.
impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Display for Ebony<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_graph(f, &self.root, "", "")
    }
}

fn write_graph<K: Ord + fmt::Debug, V: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    link: &Link<K, V>,
    head: &str,
    bar: &str,
) -> fmt::Result {
    let Some(node) = link else {
        return Ok(());
    };

    let deeper = format!("{head}    ");
    write_graph(f, &node.right, &deeper, "/")?;

    let color = match node.color {
        NodeColor::Red => 'R',
        NodeColor::Black => 'B',
    };
    writeln!(f, "{head}{bar}{color}:{:?}:{:?}", node.key, node.value)?;

    write_graph(f, &node.left, &deeper, "\\")
}
