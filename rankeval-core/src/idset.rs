//! Dense bitset over integer item identifiers.
//!
//! [`IdBitSet`] stores membership in u64 blocks and keeps its cardinality
//! up to date, so both membership and [`PositiveSet::len`] are O(1).

use crate::traits::PositiveSet;

/// A growable set of `usize` identifiers backed by u64 blocks.
///
/// Suited to rankings whose items are row indices or other small dense ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdBitSet {
    blocks: Vec<u64>,
    count: usize,
}

impl IdBitSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for ids in `0..capacity` without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            blocks: vec![0u64; capacity.div_ceil(64)],
            count: 0,
        }
    }

    /// Build a set containing the index of every `true` label.
    pub fn from_labels(labels: &[bool]) -> Self {
        let mut set = Self::with_capacity(labels.len());
        for (i, &b) in labels.iter().enumerate() {
            if b {
                set.blocks[i / 64] |= 1u64 << (i % 64);
            }
        }
        set.count = set.blocks.iter().map(|b| b.count_ones() as usize).sum();
        set
    }

    /// Insert `id`. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: usize) -> bool {
        let block = id / 64;
        if block >= self.blocks.len() {
            self.blocks.resize(block + 1, 0);
        }
        let mask = 1u64 << (id % 64);
        if self.blocks[block] & mask != 0 {
            return false;
        }
        self.blocks[block] |= mask;
        self.count += 1;
        true
    }

    /// Remove `id`. Returns `true` if it was present.
    pub fn remove(&mut self, id: usize) -> bool {
        let Some(word) = self.blocks.get_mut(id / 64) else {
            return false;
        };
        let mask = 1u64 << (id % 64);
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.count -= 1;
        true
    }

    /// Whether `id` is in the set. Ids past the allocated range are absent.
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.blocks
            .get(id / 64)
            .is_some_and(|word| (word >> (id % 64)) & 1 == 1)
    }

    /// Number of ids in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate over the ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().enumerate().flat_map(|(b, &word)| {
            let mut word = word;
            std::iter::from_fn(move || {
                if word == 0 {
                    return None;
                }
                let bit = word.trailing_zeros() as usize;
                word &= word - 1; // clear lowest set bit
                Some(b * 64 + bit)
            })
        })
    }
}

impl FromIterator<usize> for IdBitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl PositiveSet<usize> for IdBitSet {
    #[inline]
    fn contains_item(&self, item: &usize) -> bool {
        self.contains(*item)
    }

    fn len(&self) -> usize {
        self.count
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
