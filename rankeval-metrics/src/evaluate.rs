//! One-call evaluation of a ranking against every metric.
//!
//! [`evaluate_ranking`] runs the metric functions of [`crate::roc`] over a
//! single ranking according to an [`EvaluationConfig`] and gathers the
//! results into a [`RankingEvaluation`]. [`evaluate_batch`] does the same for
//! many independent rankings, in parallel with the `parallel` feature.

use rankeval_core::{PositiveSet, RankEvalError, Result, ScoreEntry};

use crate::curve::XyCurve;
use crate::roc::{
    compute_average_precision, compute_maximum_f1, compute_precision_at_k, compute_roc_auc,
    roc_curve,
};

/// What [`evaluate_ranking`] should compute beyond the always-on scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationConfig {
    /// Rank cutoffs for precision@k. Cutoffs beyond the end of a ranking are
    /// skipped.
    pub precision_at: Vec<usize>,
    /// Keep the simplified ROC curve in the result.
    pub materialize_curve: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            precision_at: vec![1, 5, 10],
            materialize_curve: true,
        }
    }
}

impl EvaluationConfig {
    /// Replace the precision@k cutoffs.
    pub fn with_precision_at(mut self, cutoffs: impl IntoIterator<Item = usize>) -> Self {
        self.precision_at = cutoffs.into_iter().collect();
        self
    }

    /// Whether to keep the ROC curve.
    pub fn with_curve(mut self, materialize: bool) -> Self {
        self.materialize_curve = materialize;
        self
    }
}

/// Metrics of one ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingEvaluation {
    /// Number of ranked entries.
    pub entries: usize,
    /// Size of the positive set (P).
    pub positives: usize,
    /// Entries whose item is not a positive (N).
    pub negatives: usize,
    /// ROC AUC; `None` when the ranking holds no negatives.
    pub roc_auc: Option<f64>,
    /// Simplified ROC curve, when requested and defined.
    pub roc_curve: Option<XyCurve>,
    pub average_precision: f64,
    pub maximum_f1: f64,
    /// `(k, precision@k)` for every configured cutoff within the ranking.
    pub precision_at: Vec<(usize, f64)>,
}

/// Evaluate `ranking` against `positives`.
///
/// A ranking without negatives is not an error here: the ROC fields are left
/// empty and the precision-based metrics are still reported.
///
/// # Errors
///
/// Returns [`RankEvalError::EmptyPositiveSet`] if `positives` is empty.
pub fn evaluate_ranking<E, S>(
    positives: &S,
    ranking: &[E],
    config: &EvaluationConfig,
) -> Result<RankingEvaluation>
where
    E: ScoreEntry,
    S: PositiveSet<E::Item> + ?Sized,
{
    let p = positives.len();
    if p == 0 {
        return Err(RankEvalError::EmptyPositiveSet);
    }
    let hits = ranking
        .iter()
        .filter(|e| positives.contains_item(e.item()))
        .count();
    let negatives = ranking.len() - hits;

    let (roc_auc, curve) = match (negatives, config.materialize_curve) {
        (0, _) => (None, None),
        (_, true) => {
            let roc = roc_curve(positives, ranking)?;
            (Some(roc.auc), Some(roc.curve))
        }
        (_, false) => (Some(compute_roc_auc(positives, ranking)?), None),
    };
    let average_precision = compute_average_precision(positives, ranking)?;
    let maximum_f1 = compute_maximum_f1(positives, ranking)?;
    let precision_at = config
        .precision_at
        .iter()
        .copied()
        .filter(|k| (1..=ranking.len()).contains(k))
        .map(|k| compute_precision_at_k(positives, ranking, k).map(|v| (k, v)))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        event = "ranking_evaluated",
        entries = ranking.len(),
        positives = p,
        negatives,
        roc_auc,
        average_precision,
        maximum_f1,
        "evaluated ranking"
    );

    Ok(RankingEvaluation {
        entries: ranking.len(),
        positives: p,
        negatives,
        roc_auc,
        roc_curve: curve,
        average_precision,
        maximum_f1,
        precision_at,
    })
}

/// Evaluate many independent rankings with the same configuration.
///
/// Each job is a `(positives, ranking)` pair; results come back in job
/// order, one `Result` per job so a bad ranking does not hide the others.
pub fn evaluate_batch<E, S>(
    jobs: &[(&S, &[E])],
    config: &EvaluationConfig,
) -> Vec<Result<RankingEvaluation>>
where
    E: ScoreEntry + Sync,
    S: PositiveSet<E::Item> + Sync + ?Sized,
{
    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        jobs.par_iter()
            .map(|&(positives, ranking)| evaluate_ranking(positives, ranking, config))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let results = jobs
        .iter()
        .map(|&(positives, ranking)| evaluate_ranking(positives, ranking, config))
        .collect();

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn positives() -> HashSet<u32> {
        [1, 2, 3, 4, 5].into_iter().collect()
    }

    fn ranking() -> Vec<(f64, u32)> {
        vec![
            (0.0, 1),
            (1.0, 2),
            (2.0, 6),
            (3.0, 7),
            (3.0, 3),
            (4.0, 8),
            (4.0, 4),
            (5.0, 9),
            (6.0, 5),
        ]
    }

    #[test]
    fn full_report() {
        let config = EvaluationConfig::default().with_precision_at([1, 4, 9, 20]);
        let eval = evaluate_ranking(&positives(), &ranking(), &config).unwrap();
        assert_eq!(eval.entries, 9);
        assert_eq!(eval.positives, 5);
        assert_eq!(eval.negatives, 4);
        assert!((eval.roc_auc.unwrap() - 0.6).abs() < 1e-14);
        assert_eq!(eval.roc_curve.as_ref().map(XyCurve::len), Some(6));
        assert!((eval.average_precision - 0.7453968253968254).abs() < 1e-14);
        assert!((eval.maximum_f1 - 0.7142857142857143).abs() < 1e-14);
        // k = 20 lies past the ranking and is skipped.
        let ks: Vec<usize> = eval.precision_at.iter().map(|&(k, _)| k).collect();
        assert_eq!(ks, vec![1, 4, 9]);
        assert!((eval.precision_at[1].1 - 2.5 / 4.0).abs() < 1e-14);
    }

    #[test]
    fn curve_can_be_skipped() {
        let config = EvaluationConfig::default().with_curve(false);
        let eval = evaluate_ranking(&positives(), &ranking(), &config).unwrap();
        assert!(eval.roc_curve.is_none());
        assert!((eval.roc_auc.unwrap() - 0.6).abs() < 1e-14);
    }

    #[test]
    fn no_negatives_leaves_roc_empty() {
        let positives: HashSet<u32> = [1, 2].into_iter().collect();
        let ranking = [(0.0, 1u32), (0.5, 2)];
        let eval = evaluate_ranking(&positives, &ranking, &EvaluationConfig::default()).unwrap();
        assert_eq!(eval.negatives, 0);
        assert!(eval.roc_auc.is_none() && eval.roc_curve.is_none());
        assert!((eval.average_precision - 1.0).abs() < 1e-14);
    }

    #[test]
    fn empty_positive_set_error() {
        let none: HashSet<u32> = HashSet::new();
        assert_eq!(
            evaluate_ranking(&none, &ranking(), &EvaluationConfig::default()),
            Err(RankEvalError::EmptyPositiveSet)
        );
    }

    #[test]
    fn batch_keeps_job_order() {
        let good = positives();
        let none: HashSet<u32> = HashSet::new();
        let r = ranking();
        let jobs: Vec<(&HashSet<u32>, &[(f64, u32)])> = vec![
            (&good, r.as_slice()),
            (&none, r.as_slice()),
            (&good, &r[..3]),
        ];
        let results = evaluate_batch(&jobs, &EvaluationConfig::default());
        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        assert!((first.average_precision - 0.7453968253968254).abs() < 1e-14);
        assert_eq!(results[1], Err(RankEvalError::EmptyPositiveSet));
        assert_eq!(results[2].as_ref().unwrap().entries, 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let eval =
            evaluate_ranking(&positives(), &ranking(), &EvaluationConfig::default()).unwrap();
        let json = serde_json::to_string(&eval).unwrap();
        let back: RankingEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.roc_curve, eval.roc_curve);
        assert_eq!(back.entries, eval.entries);
    }
}
