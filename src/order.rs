use std::cmp::Ordering;

/// Total order over keys, injected into the index at construction time.
///
/// Every ordering decision made by the tree, during mutation and during
/// queries, goes through the captured comparator; key comparison is
/// never hard-coded to [Ord].
pub trait Comparator<K> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Natural ordering, delegates to the key's [Ord] implementation. This
/// is the default comparator for [Oset][crate::Oset].
#[derive(Clone, Copy, Default, Debug)]
pub struct Natural;

impl<K> Comparator<K> for Natural
where
    K: Ord,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

// Closures double up as comparators, `|a, b| b.cmp(a)` gives an index
// in descending order.
impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
