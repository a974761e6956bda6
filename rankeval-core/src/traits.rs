//! Capability traits the metrics engine is written against.
//!
//! The engine never looks at a concrete identifier or container type. A
//! ranking is any iterator of [`ScoreEntry`] values, and the ground truth is
//! any [`PositiveSet`] over the entries' item type.

use std::borrow::Borrow;
use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

/// One position of a ranking: a score and the item it belongs to.
pub trait ScoreEntry {
    /// Identifier type of the ranked items.
    type Item: ?Sized;

    /// The score value. Lower scores rank first.
    fn score(&self) -> f64;

    /// The ranked item.
    fn item(&self) -> &Self::Item;
}

impl<T> ScoreEntry for (f64, T) {
    type Item = T;

    #[inline]
    fn score(&self) -> f64 {
        self.0
    }

    #[inline]
    fn item(&self) -> &T {
        &self.1
    }
}

impl<E: ScoreEntry + ?Sized> ScoreEntry for &E {
    type Item = E::Item;

    #[inline]
    fn score(&self) -> f64 {
        (**self).score()
    }

    #[inline]
    fn item(&self) -> &E::Item {
        (**self).item()
    }
}

/// Ground-truth membership: which items count as positives.
pub trait PositiveSet<T: ?Sized> {
    /// Whether `item` is a positive.
    fn contains_item(&self, item: &T) -> bool;

    /// Number of positives (P).
    fn len(&self) -> usize;

    /// Whether there are no positives at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, Q, S> PositiveSet<Q> for HashSet<T, S>
where
    T: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn contains_item(&self, item: &Q) -> bool {
        self.contains(item)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T, Q> PositiveSet<Q> for BTreeSet<T>
where
    T: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    #[inline]
    fn contains_item(&self, item: &Q) -> bool {
        self.contains(item)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl<T: ?Sized, P: PositiveSet<T> + ?Sized> PositiveSet<T> for &P {
    #[inline]
    fn contains_item(&self, item: &T) -> bool {
        (**self).contains_item(item)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
