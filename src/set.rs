use std::borrow::Borrow;

use crate::{Ebony, EbonyKeys};

/// An ordered set of unique keys.
///
/// Thin layer over an [`Ebony`] map with unit values; every operation
/// delegates to the tree and inherits its `O(log n)` bounds.
pub struct EbonySet<K: Ord> {
    tree: Ebony<K, ()>,
}

impl<K: Ord> EbonySet<K> {
    #[must_use]
    pub const fn new() -> Self {
        Self { tree: Ebony::new() }
    }

    /// Adds `key` to the set. Returns `true` if it was not already
    /// present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(key, ()).is_none()
    }

    /// Removes `key` from the set. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).is_some()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    pub fn min(&self) -> Option<&K> {
        self.tree.min()
    }

    pub fn max(&self) -> Option<&K> {
        self.tree.max()
    }

    /// Ascending iterator over the set's keys.
    pub fn iter(&self) -> EbonyKeys<'_, K, ()> {
        self.tree.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord> Default for EbonySet<K> {
    fn default() -> Self {
        Self::new()
    }
}
