//! Red-Black tree based ordered map.
//!
//! [`Ebony`] keeps its entries sorted by key and bounds the tree height
//! through red-black rebalancing, so point operations run in `O(log n)`.
//! Every rebalancing step returns its rebuilt subtree together with an
//! explicit "still fixing" flag, so the whole engine is a set of
//! self-contained recursive functions over owned subtrees.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

mod check;
mod iter;
mod set;

#[cfg(test)]
mod proptests;

pub use iter::{EbonyKeys, EbonySortedIterator, EbonyValues};
pub use set::EbonySet;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    #[default]
    Red,
    Black,
}

pub(crate) type Link<K, V> = Option<Box<EbonyNode<K, V>>>;

#[derive(Debug, Clone)]
pub(crate) struct EbonyNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: NodeColor,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> EbonyNode<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: NodeColor::default(),
            left: None,
            right: None,
        }
    }
}

pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    matches!(link, Some(node) if matches!(node.color, NodeColor::Red))
}

fn is_black<K, V>(link: &Link<K, V>) -> bool {
    matches!(link, Some(node) if matches!(node.color, NodeColor::Black))
}

fn paint<K, V>(link: &mut Link<K, V>, color: NodeColor) {
    if let Some(node) = link {
        node.color = color;
    }
}

/// An ordered map backed by a red-black tree.
///
/// Keys are unique; inserting an existing key overwrites its value in
/// place without touching the tree structure.
#[derive(Debug, Clone)]
pub struct Ebony<K: Ord, V> {
    pub(crate) root: Link<K, V>,
    length: usize,
}

impl<K: Ord, V> Ebony<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Drops every entry at once.
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }

        None
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();

        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }

        None
    }

    /// Smallest key in the map, `None` when empty.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;

        while let Some(left) = node.left.as_deref() {
            node = left;
        }

        Some(&node.key)
    }

    /// Largest key in the map, `None` when empty.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;

        while let Some(right) = node.right.as_deref() {
            node = right;
        }

        Some(&node.key)
    }

    /// Smallest stored key strictly greater than `key`, `None` when no
    /// such key exists. `key` itself does not have to be present.
    pub fn upper_bound<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        let mut bound = None;

        while let Some(node) = current {
            if node.key.borrow() > key {
                bound = Some(&node.key);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }

        bound
    }

    /// Inserts `key -> value`, returning the displaced value if the key
    /// was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, _, displaced) = insert_at(self.root.take(), key, value);
        root.color = NodeColor::Black;
        self.root = Some(root);

        if displaced.is_none() {
            self.length += 1;
        }

        displaced
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut root, _, removed) = remove_at(self.root.take(), key);
        paint(&mut root, NodeColor::Black);
        self.root = root;

        if removed.is_some() {
            self.length -= 1;
        }

        removed
    }
}

impl<K: Ord, V> Default for Ebony<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Rotations rearrange links only; recoloring is the caller's business.
// A missing mandatory child means the caller picked the wrong rotation,
// which is unrecoverable.

fn rotate_left<K, V>(mut v: Box<EbonyNode<K, V>>) -> Box<EbonyNode<K, V>> {
    let Some(mut u) = v.right.take() else {
        unreachable!("left rotation requires a right child");
    };
    v.right = u.left.take();
    u.left = Some(v);
    u
}

fn rotate_right<K, V>(mut u: Box<EbonyNode<K, V>>) -> Box<EbonyNode<K, V>> {
    let Some(mut v) = u.left.take() else {
        unreachable!("right rotation requires a left child");
    };
    u.left = v.right.take();
    v.right = Some(u);
    v
}

fn rotate_left_right<K, V>(mut t: Box<EbonyNode<K, V>>) -> Box<EbonyNode<K, V>> {
    t.left = t.left.take().map(rotate_left);
    rotate_right(t)
}

fn rotate_right_left<K, V>(mut t: Box<EbonyNode<K, V>>) -> Box<EbonyNode<K, V>> {
    t.right = t.right.take().map(rotate_right);
    rotate_left(t)
}

/// Recursive insertion step. Returns the rebuilt subtree, whether an
/// ancestor still has to run the red-violation fix-up, and the value
/// displaced by an overwrite.
fn insert_at<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
) -> (Box<EbonyNode<K, V>>, bool, Option<V>) {
    let Some(mut node) = link else {
        // Fresh nodes are born red so the black height stays untouched.
        return (Box::new(EbonyNode::new(key, value)), true, None);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (child, changed, displaced) = insert_at(node.left.take(), key, value);
            node.left = Some(child);
            let (node, changed) = fix_red_violation(node, changed);
            (node, changed, displaced)
        }
        Ordering::Greater => {
            let (child, changed, displaced) = insert_at(node.right.take(), key, value);
            node.right = Some(child);
            let (node, changed) = fix_red_violation(node, changed);
            (node, changed, displaced)
        }
        Ordering::Equal => {
            let displaced = mem::replace(&mut node.value, value);
            (node, false, Some(displaced))
        }
    }
}

/// Insertion fix-up: repairs a red child carrying a red grandchild under
/// a black `node`. Once no shape matches, the signal is cleared and the
/// remaining ancestors are left alone.
fn fix_red_violation<K: Ord, V>(
    mut node: Box<EbonyNode<K, V>>,
    changed: bool,
) -> (Box<EbonyNode<K, V>>, bool) {
    if !changed || matches!(node.color, NodeColor::Red) {
        return (node, changed);
    }

    let (left_left, left_right) = match node.left.as_deref() {
        Some(left) if matches!(left.color, NodeColor::Red) => {
            (is_red(&left.left), is_red(&left.right))
        }
        _ => (false, false),
    };
    let (right_left, right_right) = match node.right.as_deref() {
        Some(right) if matches!(right.color, NodeColor::Red) => {
            (is_red(&right.left), is_red(&right.right))
        }
        _ => (false, false),
    };

    if left_left {
        node = rotate_right(node);
        paint(&mut node.left, NodeColor::Black);
    } else if left_right {
        node = rotate_left_right(node);
        paint(&mut node.left, NodeColor::Black);
    } else if right_left {
        node = rotate_right_left(node);
        paint(&mut node.right, NodeColor::Black);
    } else if right_right {
        node = rotate_left(node);
        paint(&mut node.right, NodeColor::Black);
    } else {
        return (node, false);
    }

    (node, true)
}

/// Recursive deletion step. Returns the rebuilt subtree, whether the
/// subtree is short one black node, and the removed value.
fn remove_at<K, V, Q>(link: Link<K, V>, key: &Q) -> (Link<K, V>, bool, Option<V>)
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    let Some(mut node) = link else {
        return (None, false, None);
    };

    match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (child, deficit, removed) = remove_at(node.left.take(), key);
            node.left = child;
            let (node, deficit) = fix_left_deficit(node, deficit);
            (Some(node), deficit, removed)
        }
        Ordering::Greater => {
            let (child, deficit, removed) = remove_at(node.right.take(), key);
            node.right = child;
            let (node, deficit) = fix_right_deficit(node, deficit);
            (Some(node), deficit, removed)
        }
        Ordering::Equal => match node.left.take() {
            None => {
                // Splice the node out by promoting its right child.
                // Dropping a red node costs no black height.
                let deficit = matches!(node.color, NodeColor::Black);
                let EbonyNode { value, right, .. } = *node;
                (right, deficit, Some(value))
            }
            Some(left) => {
                // Two children: the in-order predecessor replaces this
                // entry, so only the left subtree loses a node.
                let (left, deficit, (pred_key, pred_value)) = remove_max(left);
                node.left = left;
                node.key = pred_key;
                let removed = mem::replace(&mut node.value, pred_value);
                let (node, deficit) = fix_left_deficit(node, deficit);
                (Some(node), deficit, Some(removed))
            }
        },
    }
}

/// Removes the largest entry of `node`'s subtree and hands it back to
/// the caller along with the black-height deficit signal.
fn remove_max<K: Ord, V>(mut node: Box<EbonyNode<K, V>>) -> (Link<K, V>, bool, (K, V)) {
    match node.right.take() {
        Some(right) => {
            let (right, deficit, max) = remove_max(right);
            node.right = right;
            let (node, deficit) = fix_right_deficit(node, deficit);
            (Some(node), deficit, max)
        }
        None => {
            let deficit = matches!(node.color, NodeColor::Black);
            let EbonyNode { key, value, left, .. } = *node;
            (left, deficit, (key, value))
        }
    }
}

/// Deletion fix-up after the left subtree lost a black node. The case
/// split keys on the sibling's color and, for a black sibling, on which
/// of its children is red.
fn fix_left_deficit<K: Ord, V>(
    mut node: Box<EbonyNode<K, V>>,
    deficit: bool,
) -> (Box<EbonyNode<K, V>>, bool) {
    if !deficit {
        return (node, false);
    }

    let sibling_black = is_black(&node.right);
    let near_red = node.right.as_deref().is_some_and(|s| is_red(&s.left));
    let far_red = node.right.as_deref().is_some_and(|s| is_red(&s.right));

    if sibling_black && near_red {
        // Inner nephew red: double rotation, the new subtree root
        // inherits the old root's color.
        let color = node.color;
        node = rotate_right_left(node);
        node.color = color;
        paint(&mut node.left, NodeColor::Black);
        (node, false)
    } else if sibling_black && far_red {
        let color = node.color;
        node = rotate_left(node);
        node.color = color;
        paint(&mut node.left, NodeColor::Black);
        paint(&mut node.right, NodeColor::Black);
        (node, false)
    } else if sibling_black {
        // Both nephews black: recoloring pushes the deficit up unless
        // this node was red and absorbs it by turning black.
        let deficit = matches!(node.color, NodeColor::Black);
        node.color = NodeColor::Black;
        paint(&mut node.right, NodeColor::Red);
        (node, deficit)
    } else if is_red(&node.right) {
        // Red sibling: one rotation leaves the deficit one level down
        // with a black sibling, which the cases above resolve.
        node = rotate_left(node);
        node.color = NodeColor::Black;
        paint(&mut node.left, NodeColor::Red);
        let Some(left) = node.left.take() else {
            unreachable!("left rotation must leave a left child behind");
        };
        let (left, _) = fix_left_deficit(left, true);
        node.left = Some(left);
        (node, false)
    } else {
        unreachable!("black-height deficit beside a missing sibling");
    }
}

/// Mirror image of [`fix_left_deficit`] for a deficit in the right
/// subtree.
fn fix_right_deficit<K: Ord, V>(
    mut node: Box<EbonyNode<K, V>>,
    deficit: bool,
) -> (Box<EbonyNode<K, V>>, bool) {
    if !deficit {
        return (node, false);
    }

    let sibling_black = is_black(&node.left);
    let near_red = node.left.as_deref().is_some_and(|s| is_red(&s.right));
    let far_red = node.left.as_deref().is_some_and(|s| is_red(&s.left));

    if sibling_black && near_red {
        let color = node.color;
        node = rotate_left_right(node);
        node.color = color;
        paint(&mut node.right, NodeColor::Black);
        (node, false)
    } else if sibling_black && far_red {
        let color = node.color;
        node = rotate_right(node);
        node.color = color;
        paint(&mut node.left, NodeColor::Black);
        paint(&mut node.right, NodeColor::Black);
        (node, false)
    } else if sibling_black {
        let deficit = matches!(node.color, NodeColor::Black);
        node.color = NodeColor::Black;
        paint(&mut node.left, NodeColor::Red);
        (node, deficit)
    } else if is_red(&node.left) {
        node = rotate_right(node);
        node.color = NodeColor::Black;
        paint(&mut node.right, NodeColor::Red);
        let Some(right) = node.right.take() else {
            unreachable!("right rotation must leave a right child behind");
        };
        let (right, _) = fix_right_deficit(right, true);
        node.right = Some(right);
        (node, false)
    } else {
        unreachable!("black-height deficit beside a missing sibling");
    }
}
