use crate::{Ebony, EbonyNode};

/// In-order iterator over `(&key, &value)` pairs, ascending by key.
///
/// Lazy: keeps the unvisited ancestors on an explicit stack instead of
/// materializing the whole sequence up front.
pub struct EbonySortedIterator<'a, K: Ord, V> {
    pub(crate) stack: Vec<&'a EbonyNode<K, V>>,
    pub(crate) curr: Option<&'a EbonyNode<K, V>>,
}

impl<'a, K: Ord, V> Iterator for EbonySortedIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.curr {
            self.stack.push(node);
            self.curr = node.left.as_deref();
        }

        let node = self.stack.pop()?;
        self.curr = node.right.as_deref();

        Some((&node.key, &node.value))
    }
}

/// Ascending iterator over the keys of an [`Ebony`] map.
pub struct EbonyKeys<'a, K: Ord, V>(pub(crate) EbonySortedIterator<'a, K, V>);

impl<'a, K: Ord, V> Iterator for EbonyKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

/// Iterator over the values of an [`Ebony`] map, in ascending key order.
pub struct EbonyValues<'a, K: Ord, V>(pub(crate) EbonySortedIterator<'a, K, V>);

impl<'a, K: Ord, V> Iterator for EbonyValues<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

impl<K: Ord, V> Ebony<K, V> {
    pub fn iter(&self) -> EbonySortedIterator<'_, K, V> {
        EbonySortedIterator {
            stack: Vec::new(),
            curr: self.root.as_deref(),
        }
    }

    pub fn keys(&self) -> EbonyKeys<'_, K, V> {
        EbonyKeys(self.iter())
    }

    pub fn values(&self) -> EbonyValues<'_, K, V> {
        EbonyValues(self.iter())
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a Ebony<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = EbonySortedIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::Ebony;

    #[test]
    pub fn empty_iteration() {
        let tree = Ebony::<u64, u64>::new();
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    pub fn inorder_pairs() {
        let mut tree = Ebony::new();
        for key in [4u64, 1, 3, 2, 5] {
            tree.insert(key, key * 10);
        }

        let pairs: Vec<(u64, u64)> = tree.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(pairs, vec![(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);
    }

    #[test]
    pub fn keys_and_values_agree_on_order() {
        let mut tree = Ebony::new();
        for key in [9u64, 2, 7, 5] {
            tree.insert(key, key + 100);
        }

        let keys: Vec<u64> = tree.keys().copied().collect();
        let values: Vec<u64> = tree.values().copied().collect();

        assert_eq!(keys, vec![2, 5, 7, 9]);
        assert_eq!(values, vec![102, 105, 107, 109]);
    }

    #[test]
    pub fn borrowed_into_iterator() {
        let mut tree = Ebony::new();
        for key in 0u64..50 {
            tree.insert(key, key);
        }

        for (i, (&key, _)) in (&tree).into_iter().enumerate() {
            assert_eq!(key, i as u64);
        }
    }
}
