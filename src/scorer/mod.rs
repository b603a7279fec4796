//! Candidate scoring.
//!
//! - [`levenshtein`]: unit-cost edit distance
//! - [`ConfidenceScorer`]: weighted combination of edit distance, popularity and
//!   substring position into a single `[0, 1]` confidence

mod confidence;
pub mod levenshtein;

pub use confidence::{ConfidenceScorer, Weights, LEV_SUPPRESS_THRESHOLD};
