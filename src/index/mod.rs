//! Approximate domain index.
//!
//! A sub-linear alternative to the full corpus scan. Entries are weighted by
//! `1 / rank`. A lookup first tries the literal prefix against a weighted trie
//! and falls back to an n-gram fuzzy set.
//!
//! Scores returned here are raw index values (the trie weight, or the fuzzy
//! similarity) and are not comparable with confidence scores from
//! [`find_best_match`](crate::selector::find_best_match).
//!
//! ## Example
//!
//! ```
//! use domain_suggest::{ApproximateIndex, DomainCorpus};
//!
//! let corpus = DomainCorpus::load(["google.com", "facebook.com", "facilitate.net"]).unwrap();
//! let index = ApproximateIndex::build(&corpus);
//!
//! assert_eq!(index.lookup("fac").unwrap().domain, "facebook.com"); // literal prefix
//! assert_eq!(index.lookup("facebok").unwrap().domain, "facebook.com"); // fuzzy
//! assert!(index.lookup("").is_none());
//! ```

mod ngram;
mod trie;

pub use ngram::{NgramIndex, MIN_FUZZY_SCORE};
pub use trie::WeightedTrie;

use tracing::debug;

use crate::corpus::DomainCorpus;
use crate::types::{DomainEntry, MatchResult};

/// Default smallest gram size
pub const DEFAULT_NGRAM_MIN: usize = 2;
/// Default largest gram size
pub const DEFAULT_NGRAM_MAX: usize = 3;

/// Prefix trie plus n-gram fuzzy set over a corpus
#[derive(Debug, Clone)]
pub struct ApproximateIndex {
    entries: Vec<DomainEntry>,
    trie: WeightedTrie,
    ngrams: NgramIndex,
}

impl ApproximateIndex {
    /// Build with the default gram sizes.
    pub fn build(corpus: &DomainCorpus) -> Self {
        Self::build_with_grams(corpus, DEFAULT_NGRAM_MIN, DEFAULT_NGRAM_MAX)
    }

    /// Build with gram sizes `gram_min..=gram_max`.
    pub fn build_with_grams(corpus: &DomainCorpus, gram_min: usize, gram_max: usize) -> Self {
        let mut trie = WeightedTrie::new();
        let mut ngrams = NgramIndex::new(gram_min, gram_max);
        let entries: Vec<DomainEntry> = corpus.iter().cloned().collect();

        for entry in &entries {
            trie.insert(&entry.domain, entry.rank);
            ngrams.add(&entry.domain);
        }

        debug!(
            entries = entries.len(),
            trie_nodes = trie.node_count(),
            gram_min,
            gram_max,
            "built approximate index"
        );

        Self {
            entries,
            trie,
            ngrams,
        }
    }

    /// Top-weighted match for a literal or fuzzy prefix.
    ///
    /// A literal prefix hit scores its weight `1 / rank`; a fuzzy hit scores its
    /// similarity. Empty prefixes and unmatched input return `None`.
    pub fn lookup(&self, prefix: &str) -> Option<MatchResult> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return None;
        }

        if let Some(rank) = self.trie.best_with_prefix(prefix) {
            let entry = self.entry_by_rank(rank)?;
            return Some(MatchResult::new(
                entry.domain.clone(),
                entry.rank,
                entry.weight(),
            ));
        }

        let (idx, similarity) = self.ngrams.best(prefix)?;
        let entry = self.entries.get(idx)?;
        Some(MatchResult::new(entry.domain.clone(), entry.rank, similarity))
    }

    fn entry_by_rank(&self, rank: usize) -> Option<&DomainEntry> {
        rank.checked_sub(1).and_then(|idx| self.entries.get(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
