//! Suggestion engine.
//!
//! Owns a [`DomainCorpus`] and an optional [`ApproximateIndex`], and answers
//! queries with the configured [`Strategy`]. Results are memoized in an LRU
//! cache since interactive callers repeat queries while typing and deleting.
//! The cache lock only guards lookups and inserts, never a corpus scan.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

use crate::corpus::DomainCorpus;
use crate::error::{EngineError, Result};
use crate::index::{ApproximateIndex, DEFAULT_NGRAM_MAX, DEFAULT_NGRAM_MIN};
use crate::selector;
use crate::types::{CacheKey, MatchResult, Strategy};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Engine builder options.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Strategy used by [`SuggestEngine::query`]
    pub strategy: Strategy,
    /// Build the approximate index at construction
    pub build_index: bool,
    /// LRU cache size for query results, `0` disables caching
    pub cache_size: usize,
    /// Smallest n-gram size of the fuzzy index
    pub ngram_min: usize,
    /// Largest n-gram size of the fuzzy index
    pub ngram_max: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Exact,
            build_index: true,
            cache_size: DEFAULT_CACHE_SIZE,
            ngram_min: DEFAULT_NGRAM_MIN,
            ngram_max: DEFAULT_NGRAM_MAX,
        }
    }
}

impl EngineOptions {
    /// Create new engine options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable the approximate index.
    pub fn with_index(mut self, build_index: bool) -> Self {
        self.build_index = build_index;
        self
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Set the n-gram sizes of the fuzzy index.
    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_min = min;
        self.ngram_max = max;
        self
    }
}

/// Domain suggestion engine
pub struct SuggestEngine {
    corpus: DomainCorpus,
    index: Option<ApproximateIndex>,
    strategy: Strategy,
    cache: Option<Mutex<LruCache<CacheKey, Option<MatchResult>>>>,
}

impl SuggestEngine {
    /// Create an engine with default options from domains ordered by popularity.
    pub fn new<I, S>(domains: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(domains, EngineOptions::default())
    }

    /// Create an engine with explicit options.
    pub fn with_options<I, S>(domains: I, options: EngineOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let corpus = DomainCorpus::load(domains)?;
        Ok(Self::from_corpus(corpus, options))
    }

    /// Create an engine over an already loaded corpus.
    pub fn from_corpus(corpus: DomainCorpus, options: EngineOptions) -> Self {
        let index = options.build_index.then(|| {
            ApproximateIndex::build_with_grams(&corpus, options.ngram_min, options.ngram_max)
        });
        let cache = NonZeroUsize::new(options.cache_size).map(|size| Mutex::new(LruCache::new(size)));

        Self {
            corpus,
            index,
            strategy: options.strategy,
            cache,
        }
    }

    /// Best match by full corpus scan.
    pub fn best_match(&self, query: &str) -> Result<MatchResult> {
        self.query_with(Strategy::Exact, query)?
            .ok_or(EngineError::EmptyCorpus)
    }

    /// Best match from the approximate index, `None` if nothing matches or
    /// the index was not built.
    pub fn approximate_match(&self, prefix: &str) -> Option<MatchResult> {
        self.query_with(Strategy::Approximate, prefix).ok().flatten()
    }

    /// Answer a query with the configured strategy.
    ///
    /// The exact strategy always yields `Some`.
    pub fn query(&self, query: &str) -> Result<Option<MatchResult>> {
        self.query_with(self.strategy, query)
    }

    /// Answer a query with an explicit strategy.
    pub fn query_with(&self, strategy: Strategy, query: &str) -> Result<Option<MatchResult>> {
        let Some(cache) = &self.cache else {
            return self.compute(strategy, query);
        };

        let key = CacheKey::new(strategy, query);

        if let Some(cached) = cache.lock().get(&key) {
            trace!(query, ?strategy, "suggestion cache hit");
            return Ok(cached.clone());
        }

        // Scan runs unlocked; concurrent misses on one key may both compute it.
        let result = self.compute(strategy, query)?;
        cache.lock().put(key, result.clone());
        Ok(result)
    }

    fn compute(&self, strategy: Strategy, query: &str) -> Result<Option<MatchResult>> {
        match strategy {
            Strategy::Exact => selector::find_best_match(&self.corpus, query).map(Some),
            Strategy::Approximate => {
                let index = self.index.as_ref().ok_or(EngineError::IndexUnavailable)?;
                Ok(index.lookup(query))
            }
        }
    }

    /// The `k` best exact matches, most confident first.
    pub fn top_matches(&self, query: &str, k: usize) -> Result<Vec<MatchResult>> {
        selector::top_matches(&self.corpus, query, k)
    }

    pub fn corpus(&self) -> &DomainCorpus {
        &self.corpus
    }

    pub fn index(&self) -> Option<&ApproximateIndex> {
        self.index.as_ref()
    }

    /// Default strategy used by [`query`](SuggestEngine::query)
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Clear the result cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Number of cached query results
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }
}
