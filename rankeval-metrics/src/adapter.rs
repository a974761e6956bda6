//! Turning raw score lists into rankings.
//!
//! The metric functions expect an already sorted ranking. [`LabeledRanking`]
//! builds one from parallel score and label slices, the shape in which
//! outlier detectors and classifiers usually report their output.

use std::cmp::Ordering;

use rankeval_core::{IdBitSet, RankEvalError, Result};

use crate::evaluate::{evaluate_ranking, EvaluationConfig, RankingEvaluation};

/// Which end of the score range ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreOrder {
    /// Low scores first (distances, p-values).
    #[default]
    Ascending,
    /// High scores first (outlier scores, classifier confidences).
    Descending,
}

/// A sorted ranking of sample indices with its positive set.
#[derive(Debug, Clone)]
pub struct LabeledRanking {
    entries: Vec<(f64, usize)>,
    positives: IdBitSet,
}

impl LabeledRanking {
    /// Rank `scores` in the given order, marking index `i` positive when
    /// `labels[i]` is `true`.
    ///
    /// The sort is stable, so tied samples keep their input order. NaN
    /// scores rank last in either order.
    ///
    /// # Errors
    ///
    /// Returns an error if the slices are empty or have different lengths.
    pub fn from_scores(scores: &[f64], labels: &[bool], order: ScoreOrder) -> Result<Self> {
        if scores.is_empty() {
            return Err(RankEvalError::InvalidInput("empty input".into()));
        }
        if scores.len() != labels.len() {
            return Err(RankEvalError::InvalidInput(format!(
                "scores length {} != labels length {}",
                scores.len(),
                labels.len()
            )));
        }

        let mut entries: Vec<(f64, usize)> = scores.iter().copied().zip(0..).collect();
        entries.sort_by(|a, b| compare_scores(a.0, b.0, order));

        Ok(Self {
            entries,
            positives: IdBitSet::from_labels(labels),
        })
    }

    /// `(score, sample index)` pairs, best first.
    pub fn entries(&self) -> &[(f64, usize)] {
        &self.entries
    }

    /// Indices of the positive samples.
    pub fn positives(&self) -> &IdBitSet {
        &self.positives
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run [`evaluate_ranking`] on this ranking.
    ///
    /// # Errors
    ///
    /// Returns [`RankEvalError::EmptyPositiveSet`] when no label is `true`.
    pub fn evaluate(&self, config: &EvaluationConfig) -> Result<RankingEvaluation> {
        evaluate_ranking(&self.positives, &self.entries, config)
    }
}

/// Order two scores, NaN last regardless of direction.
fn compare_scores(a: f64, b: f64, order: ScoreOrder) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match order {
            ScoreOrder::Ascending => a.total_cmp(&b),
            ScoreOrder::Descending => b.total_cmp(&a),
        },
    }
}
