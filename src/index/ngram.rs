//! Character n-gram fuzzy set.
//!
//! Values are normalized (lowercased, non-alphanumerics dropped), padded with
//! `-` and split into overlapping grams for each configured size. A lookup
//! collects every value sharing a gram with the query, ranks them by cosine
//! similarity of gram counts, and re-scores the leaders by edit distance.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::scorer::levenshtein;

/// Results scoring below this are discarded
pub const MIN_FUZZY_SCORE: f64 = 0.33;

/// Cosine leaders re-scored by edit distance
const RESCORE_CANDIDATES: usize = 50;

/// Gram postings for one gram size
#[derive(Debug, Clone, Default)]
struct GramTable {
    /// gram -> (value index, occurrences)
    postings: HashMap<String, Vec<(usize, u32)>>,
    /// Euclidean norm of each value's gram vector
    norms: Vec<f64>,
}

/// N-gram index over a set of values
#[derive(Debug, Clone)]
pub struct NgramIndex {
    gram_min: usize,
    /// Normalized values, index-aligned with insertion order
    values: Vec<String>,
    /// One table per gram size, ascending from `gram_min`
    tables: Vec<GramTable>,
}

impl NgramIndex {
    /// Create an empty index. Sizes are clamped to at least 1 and reordered if reversed.
    pub fn new(gram_min: usize, gram_max: usize) -> Self {
        let gram_min = gram_min.max(1);
        let gram_max = gram_max.max(1);
        let (gram_min, gram_max) = if gram_min <= gram_max {
            (gram_min, gram_max)
        } else {
            (gram_max, gram_min)
        };
        Self {
            gram_min,
            values: Vec::new(),
            tables: vec![GramTable::default(); gram_max - gram_min + 1],
        }
    }

    /// Add a value; returns its index.
    pub fn add(&mut self, value: &str) -> usize {
        let idx = self.values.len();
        let normalized = normalize(value);

        for (offset, table) in self.tables.iter_mut().enumerate() {
            let counts = gram_counts(&normalized, self.gram_min + offset);
            let norm = counts
                .values()
                .map(|&c| f64::from(c) * f64::from(c))
                .sum::<f64>()
                .sqrt();
            for (gram, count) in counts {
                table.postings.entry(gram).or_default().push((idx, count));
            }
            table.norms.push(norm);
        }

        self.values.push(normalized);
        idx
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Best match for `query` as `(value index, similarity)`.
    ///
    /// Gram sizes are tried largest first; the first size producing a result
    /// at or above [`MIN_FUZZY_SCORE`] wins. Ties go to the lower index.
    pub fn best(&self, query: &str) -> Option<(usize, f64)> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return None;
        }

        for offset in (0..self.tables.len()).rev() {
            if let Some(found) = self.best_for_size(&normalized, offset) {
                return Some(found);
            }
        }
        None
    }

    fn best_for_size(&self, normalized: &str, offset: usize) -> Option<(usize, f64)> {
        let table = &self.tables[offset];
        let counts = gram_counts(normalized, self.gram_min + offset);
        let query_norm = counts
            .values()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt();

        let mut dots: HashMap<usize, f64> = HashMap::new();
        for (gram, &query_count) in &counts {
            if let Some(postings) = table.postings.get(gram) {
                for &(idx, count) in postings {
                    *dots.entry(idx).or_insert(0.0) += f64::from(query_count) * f64::from(count);
                }
            }
        }
        if dots.is_empty() {
            return None;
        }

        let mut cosine: Vec<(usize, f64)> = dots
            .into_iter()
            .map(|(idx, dot)| (idx, dot / (query_norm * table.norms[idx])))
            .collect();
        cosine.sort_by(|a, b| by_score_then_index(*a, *b));
        cosine.truncate(RESCORE_CANDIDATES);

        cosine
            .into_iter()
            .map(|(idx, _)| (idx, edit_similarity(normalized, &self.values[idx])))
            .filter(|&(_, score)| score >= MIN_FUZZY_SCORE)
            .min_by(|a, b| by_score_then_index(*a, *b))
    }
}

/// Descending score, then ascending index
fn by_score_then_index(a: (usize, f64), b: (usize, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then(a.0.cmp(&b.0))
}

/// `1 - distance / longer length`
fn edit_similarity(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }
    1.0 - levenshtein::distance(a, b) as f64 / longer as f64
}

fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect()
}

fn gram_counts(normalized: &str, size: usize) -> HashMap<String, u32> {
    let mut padded: Vec<char> = Vec::with_capacity(normalized.len() + 2);
    padded.push('-');
    padded.extend(normalized.chars());
    padded.push('-');
    while padded.len() < size {
        padded.push('-');
    }

    let mut counts = HashMap::new();
    for window in padded.windows(size) {
        *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
    }
    counts
}
