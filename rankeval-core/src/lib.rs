//! Shared primitives for the rankeval ranking-evaluation crates.
//!
//! `rankeval-core` provides the foundation the metrics crate builds on:
//!
//! - **Error types** — [`RankEvalError`] and [`Result`] for structured error handling
//! - **Traits** — [`ScoreEntry`] for ranked entries, [`PositiveSet`] for ground truth
//! - **Id sets** — [`IdBitSet`], a dense bitset over integer item ids

pub mod error;
pub mod idset;
pub mod traits;

pub use error::{RankEvalError, Result};
pub use idset::IdBitSet;
pub use traits::*;
