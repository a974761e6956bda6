//! Ranking evaluation metrics.
//!
//! Every function takes a ground-truth [`PositiveSet`] and a ranking: any
//! iterable of [`ScoreEntry`] values already sorted by ascending score, the
//! most relevant (or most outlying) entry first. Rankings are never sorted,
//! deduplicated or rescaled here; an unsorted ranking silently yields wrong
//! numbers.
//!
//! ROC, AUC, average precision and precision@k are computed per tie group
//! (see [`TieGroups`]), so they do not depend on how tied entries happen to
//! be ordered. Maximum F1 walks individual ranks.

use rankeval_core::{PositiveSet, RankEvalError, Result, ScoreEntry};

use crate::curve::XyCurve;
use crate::ties::TieGroups;

/// X axis label of materialized ROC curves.
pub const FPR_LABEL: &str = "False Positive Rate";
/// Y axis label of materialized ROC curves.
pub const TPR_LABEL: &str = "True Positive Rate";

/// ROC curve with AUC.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocCurve {
    /// Simplified curve from (0, 0) to (1, 1).
    pub curve: XyCurve,
    /// Area under the curve (trapezoidal rule).
    pub auc: f64,
}

// ---------------------------------------------------------------------------
// ROC Curve
// ---------------------------------------------------------------------------

/// Build the ROC curve of `ranking`.
///
/// Starts at (0, 0) and appends one point (FP / N, TP / P) per tie group,
/// never one per entry. Points are collected on raw counts and divided by the
/// totals once the ranking is exhausted; collinear vertices are dropped as
/// they appear. When every positive occurs in the ranking the last point is
/// exactly (1, 1).
///
/// # Errors
///
/// Returns [`RankEvalError::EmptyPositiveSet`] if `positives` is empty and
/// [`RankEvalError::NoNegatives`] if no entry of `ranking` is a negative.
pub fn materialize_roc<R, S>(positives: &S, ranking: R) -> Result<XyCurve>
where
    R: IntoIterator,
    R::Item: ScoreEntry,
    S: PositiveSet<<R::Item as ScoreEntry>::Item> + ?Sized,
{
    let p = require_positives(positives.len())?;

    let mut curve = XyCurve::with_labels(FPR_LABEL, TPR_LABEL);
    curve.append(0.0, 0.0);

    let mut tp = 0usize;
    let mut fp = 0usize;
    for group in TieGroups::new(ranking, positives) {
        tp += group.positives;
        fp += group.negatives();
        curve.append(fp as f64, tp as f64);
    }
    if fp == 0 {
        return Err(RankEvalError::NoNegatives);
    }

    curve.normalize(fp as f64, p as f64);
    Ok(curve)
}

/// ROC AUC computed directly from the ranking, without storing a curve.
///
/// Accumulates the trapezoid between consecutive (FP, TP) count pairs of
/// each tie group and divides by P·N at the end. Agrees with
/// `materialize_roc(..)?.area_under_curve()` to within rounding.
///
/// # Errors
///
/// Same conditions as [`materialize_roc`].
pub fn compute_roc_auc<R, S>(positives: &S, ranking: R) -> Result<f64>
where
    R: IntoIterator,
    R::Item: ScoreEntry,
    S: PositiveSet<<R::Item as ScoreEntry>::Item> + ?Sized,
{
    let p = require_positives(positives.len())?;

    let mut tp = 0usize;
    let mut fp = 0usize;
    // Twice the area, in count units.
    let mut acc = 0.0;
    for group in TieGroups::new(ranking, positives) {
        let prev_tp = tp;
        tp += group.positives;
        fp += group.negatives();
        if group.negatives() > 0 {
            acc += group.negatives() as f64 * (prev_tp + tp) as f64;
        }
    }
    if fp == 0 {
        return Err(RankEvalError::NoNegatives);
    }

    Ok(acc / (2.0 * p as f64 * fp as f64))
}

/// ROC curve together with its area.
///
/// Shorthand for `materialize_roc` followed by `area_under_curve`.
///
/// # Errors
///
/// Same conditions as [`materialize_roc`].
pub fn roc_curve<R, S>(positives: &S, ranking: R) -> Result<RocCurve>
where
    R: IntoIterator,
    R::Item: ScoreEntry,
    S: PositiveSet<<R::Item as ScoreEntry>::Item> + ?Sized,
{
    let curve = materialize_roc(positives, ranking)?;
    let auc = curve.area_under_curve();
    Ok(RocCurve { curve, auc })
}

// ---------------------------------------------------------------------------
// Precision-based metrics
// ---------------------------------------------------------------------------

/// Average precision of `ranking`.
///
/// For each tie group the precision TP / rank is taken after the whole
/// group, and counted once for every positive inside that group. The sum is
/// divided by P. Positives absent from the ranking contribute zero.
///
/// # Errors
///
/// Returns [`RankEvalError::EmptyPositiveSet`] if `positives` is empty.
pub fn compute_average_precision<R, S>(positives: &S, ranking: R) -> Result<f64>
where
    R: IntoIterator,
    R::Item: ScoreEntry,
    S: PositiveSet<<R::Item as ScoreEntry>::Item> + ?Sized,
{
    let p = require_positives(positives.len())?;

    let mut tp = 0usize;
    let mut rank = 0usize;
    let mut acc = 0.0;
    for group in TieGroups::new(ranking, positives) {
        tp += group.positives;
        rank += group.size;
        if group.positives > 0 {
            acc += group.positives as f64 * (tp as f64 / rank as f64);
        }
    }

    Ok(acc / p as f64)
}

/// Precision among the first `k` ranks.
///
/// When rank `k` falls inside a tie group of `m` entries holding `g`
/// positives and starting after rank `start`, the group's positives are
/// spread evenly over its ranks: TP(k) = TP(start) + g·(k − start) / m. At
/// the last rank of a group this is exactly the cumulative count.
///
/// # Errors
///
/// Returns [`RankEvalError::EmptyPositiveSet`] if `positives` is empty and
/// [`RankEvalError::RankOutOfRange`] if `k` is 0 or larger than the number
/// of entries in `ranking` (that number is P + N, and is what the error
/// reports as `total`). `k == 0` is rejected before the ranking is read, so
/// `total` is 0 in that case.
pub fn compute_precision_at_k<R, S>(positives: &S, ranking: R, k: usize) -> Result<f64>
where
    R: IntoIterator,
    R::Item: ScoreEntry,
    S: PositiveSet<<R::Item as ScoreEntry>::Item> + ?Sized,
{
    require_positives(positives.len())?;
    if k == 0 {
        return Err(RankEvalError::RankOutOfRange { k, total: 0 });
    }

    let mut tp = 0usize;
    let mut start = 0usize;
    for group in TieGroups::new(ranking, positives) {
        if k <= start + group.size {
            let expected_tp = tp as f64
                + (group.positives * (k - start)) as f64 / group.size as f64;
            return Ok(expected_tp / k as f64);
        }
        tp += group.positives;
        start += group.size;
    }

    Err(RankEvalError::RankOutOfRange { k, total: start })
}

/// Best F1 score over all cutoffs of `ranking`.
///
/// Walks the entries one rank at a time in the order given, ties included,
/// and keeps the largest `2·precision·recall / (precision + recall)`. A rank
/// with neither precision nor recall scores 0.
///
/// # Errors
///
/// Returns [`RankEvalError::EmptyPositiveSet`] if `positives` is empty.
pub fn compute_maximum_f1<R, S>(positives: &S, ranking: R) -> Result<f64>
where
    R: IntoIterator,
    R::Item: ScoreEntry,
    S: PositiveSet<<R::Item as ScoreEntry>::Item> + ?Sized,
{
    let p = require_positives(positives.len())? as f64;

    let mut tp = 0usize;
    let mut best = 0.0f64;
    for (rank, entry) in (1usize..).zip(ranking) {
        if positives.contains_item(entry.item()) {
            tp += 1;
        }
        let precision = tp as f64 / rank as f64;
        let recall = tp as f64 / p;
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        best = best.max(f1);
    }

    Ok(best)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// P, or an error when the positive set is empty.
#[inline]
fn require_positives(p: usize) -> Result<usize> {
    if p == 0 {
        return Err(RankEvalError::EmptyPositiveSet);
    }
    Ok(p)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
