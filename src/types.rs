use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading label of a domain: everything before the first dot
static LEADING_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^.]+)\.").expect("LEADING_LABEL: hardcoded regex is invalid")
});

/// Text before the first dot of `domain`, `None` if it has no dot.
pub fn leading_label(domain: &str) -> Option<&str> {
    LEADING_LABEL
        .captures(domain)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Matching strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Full corpus scan with confidence scoring
    #[default]
    Exact,
    /// Approximate index lookup (prefix trie with n-gram fallback)
    Approximate,
}

/// A known domain and its popularity rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    /// Domain name, e.g. "google.com"
    pub domain: String,
    /// 1-based popularity rank (1 = most popular)
    pub rank: usize,
}

impl DomainEntry {
    pub fn new(domain: impl Into<String>, rank: usize) -> Self {
        Self {
            domain: domain.into(),
            rank,
        }
    }

    /// Index weight, `1 / rank`.
    pub fn weight(&self) -> f64 {
        1.0 / self.rank.max(1) as f64
    }

    /// Leading label of the domain ("google" for "google.com").
    /// Returns `None` for single-label names such as "localhost".
    pub fn name(&self) -> Option<&str> {
        leading_label(&self.domain)
    }
}

/// A domain scored against a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// The query as typed
    pub query: String,
    /// Candidate domain
    pub domain: String,
    /// Popularity rank of the domain
    pub rank: usize,
    /// Levenshtein distance between domain and query.
    /// Signed so that a corrupted value can be rejected by the scorer.
    pub distance: i64,
    /// Char offset of `query` inside `domain`, `None` if absent
    pub substr_pos: Option<usize>,
}

impl MatchCandidate {
    /// Absolute length difference between domain and query, a lower bound of `distance`.
    /// Not used for scoring.
    pub fn min_length(&self) -> usize {
        self.domain
            .chars()
            .count()
            .abs_diff(self.query.chars().count())
    }
}

/// Per-signal scores of a candidate, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    /// Edit distance similarity
    pub domain_lev_score: f64,
    /// Popularity
    pub domain_score: f64,
    /// Substring position
    pub sub_score: f64,
}

/// Best suggestion for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Suggested domain
    pub domain: String,
    /// Popularity rank of the domain
    pub rank: usize,
    /// Confidence in `[0, 1]`
    pub score: f64,
}

impl MatchResult {
    pub fn new(domain: impl Into<String>, rank: usize, score: f64) -> Self {
        Self {
            domain: domain.into(),
            rank,
            score,
        }
    }

    /// Leading label of the suggested domain, for display ("google" for "google.com").
    pub fn name(&self) -> Option<&str> {
        leading_label(&self.domain)
    }
}

/// Cache key for the engine's LRU cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub strategy: Strategy,
    pub query: String,
}

impl CacheKey {
    pub fn new(strategy: Strategy, query: &str) -> Self {
        Self {
            strategy,
            query: query.to_string(),
        }
    }
}
