//! Grouping of ranked entries into runs of equal score.
//!
//! Metrics that must not depend on the arbitrary order of tied entries walk
//! a ranking one [`TieGroup`] at a time instead of one entry at a time.

use std::iter::Peekable;

use rankeval_core::{PositiveSet, ScoreEntry};

/// A maximal run of consecutive entries sharing the same score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieGroup {
    /// The shared score.
    pub score: f64,
    /// Number of entries in the run (always at least 1).
    pub size: usize,
    /// How many of those entries are positives.
    pub positives: usize,
}

impl TieGroup {
    /// Number of negative entries in the run.
    #[inline]
    pub fn negatives(&self) -> usize {
        self.size - self.positives
    }
}

/// Iterator adapter yielding the [`TieGroup`]s of a ranking.
///
/// Scores are compared with `==`, so a NaN score never ties with anything
/// and forms a group of its own.
pub struct TieGroups<'a, I, S>
where
    I: Iterator,
    S: ?Sized,
{
    entries: Peekable<I>,
    positives: &'a S,
}

impl<'a, I, S> TieGroups<'a, I, S>
where
    I: Iterator,
    I::Item: ScoreEntry,
    S: PositiveSet<<I::Item as ScoreEntry>::Item> + ?Sized,
{
    /// Group `ranking`, testing membership against `positives`.
    pub fn new<R>(ranking: R, positives: &'a S) -> Self
    where
        R: IntoIterator<IntoIter = I>,
    {
        Self {
            entries: ranking.into_iter().peekable(),
            positives,
        }
    }
}

impl<I, S> Iterator for TieGroups<'_, I, S>
where
    I: Iterator,
    I::Item: ScoreEntry,
    S: PositiveSet<<I::Item as ScoreEntry>::Item> + ?Sized,
{
    type Item = TieGroup;

    fn next(&mut self) -> Option<TieGroup> {
        let first = self.entries.next()?;
        let score = first.score();
        let mut group = TieGroup {
            score,
            size: 1,
            positives: usize::from(self.positives.contains_item(first.item())),
        };
        while let Some(entry) = self.entries.next_if(|e| e.score() == score) {
            group.size += 1;
            if self.positives.contains_item(entry.item()) {
                group.positives += 1;
            }
        }
        Some(group)
    }
}
