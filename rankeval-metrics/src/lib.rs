//! Ranking evaluation for the rankeval crates.
//!
//! Scores a ranking (entries sorted by ascending score, best first) against a
//! set of known positives:
//!
//! - **ROC** — simplified ROC curve ([`materialize_roc`]) and its area,
//!   either from the curve or counted directly ([`compute_roc_auc`])
//! - **Average precision** — [`compute_average_precision`]
//! - **Precision@k** — [`compute_precision_at_k`], with ties spread evenly
//! - **Maximum F1** — [`compute_maximum_f1`]
//! - **Reports** — [`evaluate_ranking`] / [`evaluate_batch`] gather everything
//!   in one [`RankingEvaluation`]
//! - **Adapters** — [`LabeledRanking`] sorts raw scores and labels into a ranking

pub mod adapter;
pub mod curve;
pub mod evaluate;
pub mod roc;
pub mod ties;

pub use adapter::{LabeledRanking, ScoreOrder};
pub use curve::{Bounds, CurvePoint, XyCurve};
pub use evaluate::{evaluate_batch, evaluate_ranking, EvaluationConfig, RankingEvaluation};
pub use roc::{
    compute_average_precision, compute_maximum_f1, compute_precision_at_k, compute_roc_auc,
    materialize_roc, roc_curve, RocCurve,
};
pub use ties::{TieGroup, TieGroups};

pub use rankeval_core::{IdBitSet, PositiveSet, RankEvalError, Result, ScoreEntry};
