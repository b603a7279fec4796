//! Domain Suggest - ranks known internet domains against a partially typed query
//!
//! Given a corpus of domains ordered by global popularity, the engine picks the
//! single best-matching domain for a query and a confidence score in `[0, 1]`.
//!
//! - Levenshtein edit distance between query and domain
//! - Quadratic popularity decay by rank
//! - Literal substring position (earlier is better)
//! - Optional approximate index (weighted prefix trie + n-gram fuzzy set)
//! - LRU caching of repeated queries
//!
//! # Example
//!
//! ```rust
//! use domain_suggest::{EngineOptions, Strategy, SuggestEngine};
//!
//! let engine = SuggestEngine::with_options(
//!     ["google.com", "facebook.com", "bing.com"],
//!     EngineOptions::new().with_cache_size(256),
//! )
//! .unwrap();
//!
//! // Full scan with confidence scoring
//! let best = engine.best_match("google.com").unwrap();
//! assert_eq!(best.domain, "google.com");
//! assert!((best.score - 1.0).abs() < 1e-9);
//!
//! // Approximate lookup
//! let fast = engine.query_with(Strategy::Approximate, "fac").unwrap();
//! assert_eq!(fast.unwrap().domain, "facebook.com");
//! ```
//!
//! # Scoring
//!
//! | Signal | Formula | Weight |
//! |--------|---------|--------|
//! | Substring | `1 - pos / len(domain)`, `0` if absent | 10 |
//! | Edit distance | `1 - min(distance / len(domain), 1)` | 5 |
//! | Popularity | `(N - (rank - 1))^2 / N^2` | 5 |
//!
//! The substring weight drops to `0` when the query is not a substring but the
//! edit distance similarity is at least `0.60`, so typos are not penalized.

pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod scorer;
pub mod selector;
pub mod types;

// Re-export commonly used items
pub use corpus::DomainCorpus;
pub use engine::{EngineOptions, SuggestEngine, DEFAULT_CACHE_SIZE};
pub use error::{EngineError, Result};
pub use index::{ApproximateIndex, NgramIndex, WeightedTrie, MIN_FUZZY_SCORE};
pub use scorer::{levenshtein, ConfidenceScorer, Weights, LEV_SUPPRESS_THRESHOLD};
pub use selector::{build_candidate, find_best_match, top_matches};
pub use types::{
    leading_label, DomainEntry, MatchCandidate, MatchResult, ScoreBreakdown, Strategy,
};
