//! Full-scan match selection.
//!
//! Every corpus entry is turned into a [`MatchCandidate`], scored, and the best
//! one kept. Entries are visited in ascending rank order and only a strictly
//! greater score replaces the current best, so the more popular domain wins ties.

use std::cmp::Ordering;

use crate::corpus::DomainCorpus;
use crate::error::{EngineError, Result};
use crate::scorer::{levenshtein, ConfidenceScorer};
use crate::types::{DomainEntry, MatchCandidate, MatchResult};

/// Build the candidate record for one corpus entry.
///
/// Substring search is literal and case-sensitive; the position is reported in chars.
pub fn build_candidate(entry: &DomainEntry, query: &str) -> MatchCandidate {
    let domain = entry.domain.as_str();
    let substr_pos = domain
        .find(query)
        .map(|byte_pos| domain[..byte_pos].chars().count());

    MatchCandidate {
        query: query.to_string(),
        domain: entry.domain.clone(),
        rank: entry.rank,
        distance: levenshtein::distance(domain, query) as i64,
        substr_pos,
    }
}

/// Find the single best-matching domain for `query`.
pub fn find_best_match(corpus: &DomainCorpus, query: &str) -> Result<MatchResult> {
    let scorer = ConfidenceScorer::for_corpus(corpus);
    let mut best: Option<MatchResult> = None;

    for entry in corpus.iter().filter(|e| !e.domain.is_empty()) {
        let score = scorer.score(&build_candidate(entry, query))?;
        let best_score = best.as_ref().map_or(0.0, |b| b.score);
        if best.is_none() || score > best_score {
            best = Some(MatchResult::new(entry.domain.clone(), entry.rank, score));
        }
    }

    best.ok_or(EngineError::EmptyCorpus)
}

/// The `k` best matches for `query`, by descending score then ascending rank.
///
/// Domains scoring `0` are left out.
pub fn top_matches(corpus: &DomainCorpus, query: &str, k: usize) -> Result<Vec<MatchResult>> {
    if corpus.size() == 0 {
        return Err(EngineError::EmptyCorpus);
    }
    if k == 0 {
        return Ok(Vec::new());
    }

    let scorer = ConfidenceScorer::for_corpus(corpus);
    let mut results = Vec::new();
    for entry in corpus.iter().filter(|e| !e.domain.is_empty()) {
        let score = scorer.score(&build_candidate(entry, query))?;
        if score > 0.0 {
            results.push(MatchResult::new(entry.domain.clone(), entry.rank, score));
        }
    }

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.rank.cmp(&b.rank))
    });
    results.truncate(k);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_build_candidate() {
        let entry = DomainEntry::new("facebook.com", 2);
        let c = build_candidate(&entry, "book");
        assert_eq!(c.rank, 2);
        assert_eq!(c.distance, 8);
        assert_eq!(c.substr_pos, Some(4));
        assert_eq!(c.query, "book");
    }

    #[test]
    fn test_build_candidate_case_sensitive() {
        let entry = DomainEntry::new("google.com", 1);
        assert_eq!(build_candidate(&entry, "Goo").substr_pos, None);
        assert_eq!(build_candidate(&entry, "goo").substr_pos, Some(0));
    }

    #[test]
    fn test_build_candidate_char_offset() {
        let entry = DomainEntry::new("café.fr", 1);
        assert_eq!(build_candidate(&entry, ".fr").substr_pos, Some(4));
    }

    #[test]
    fn test_exact_top_rank_match() {
        let corpus = DomainCorpus::load(["google.com", "facebook.com", "bing.com"]).unwrap();
        let result = find_best_match(&corpus, "google.com").unwrap();
        assert_eq!(result.domain, "google.com");
        assert_eq!(result.rank, 1);
        assert!((result.score - 1.0).abs() < EPS);
    }

    #[test]
    fn test_prefix_match_popular_first() {
        // facebook.com rank 1, facilitate.net rank 2, N = 2
        // facebook.com:   lev 3/12, pop 1.0,  sub 1 => (10 + 1.25 + 5) / 20    = 0.8125
        // facilitate.net: lev 3/14, pop 0.25, sub 1 => (10 + 15/14 + 1.25) / 20
        let corpus = DomainCorpus::load(["facebook.com", "facilitate.net"]).unwrap();
        let result = find_best_match(&corpus, "fac").unwrap();
        assert_eq!(result.domain, "facebook.com");
        assert!((result.score - 0.8125).abs() < EPS);

        let top = top_matches(&corpus, "fac", 2).unwrap();
        assert_eq!(top[1].domain, "facilitate.net");
        let expected = (10.0 + 5.0 * 3.0 / 14.0 + 1.25) / 20.0;
        assert!((top[1].score - expected).abs() < EPS);
    }

    #[test]
    fn test_prefix_match_popularity_outweighs_distance() {
        // facilitate.net rank 1, facebook.com rank 2, N = 2
        // facilitate.net: (10 + 15/14 + 5) / 20 ~ 0.8036
        // facebook.com:   (10 + 1.25 + 1.25) / 20 = 0.625
        let corpus = DomainCorpus::load(["facilitate.net", "facebook.com"]).unwrap();
        let result = find_best_match(&corpus, "fac").unwrap();
        assert_eq!(result.domain, "facilitate.net");
        let expected = (10.0 + 5.0 * 3.0 / 14.0 + 5.0) / 20.0;
        assert!((result.score - expected).abs() < EPS);
    }

    #[test]
    fn test_duplicate_domain_resolves_to_more_popular() {
        let corpus = DomainCorpus::load(["abc.com", "abc.com"]).unwrap();
        let result = find_best_match(&corpus, "abc.com").unwrap();
        assert_eq!(result.rank, 1);
    }

    #[test]
    fn test_query_longer_than_every_domain() {
        let corpus = DomainCorpus::load(["a.io", "b.io"]).unwrap();
        let result = find_best_match(&corpus, "this-query-is-much-longer-than-any-domain").unwrap();
        assert!((0.0..=1.0).contains(&result.score));
        // lev clamps to 0, no substring: only popularity contributes
        assert_eq!(result.domain, "a.io");
        assert!((result.score - 0.25).abs() < EPS, "got {}", result.score);
    }

    #[test]
    fn test_deterministic() {
        let corpus = DomainCorpus::load(["google.com", "gmail.com", "github.com"]).unwrap();
        let first = find_best_match(&corpus, "gi").unwrap();
        for _ in 0..5 {
            assert_eq!(find_best_match(&corpus, "gi").unwrap(), first);
        }
    }

    #[test]
    fn test_top_matches_ordering_and_limit() {
        let corpus =
            DomainCorpus::load(["google.com", "gmail.com", "github.com", "bing.com"]).unwrap();
        let top = top_matches(&corpus, "g", 3).unwrap();
        assert_eq!(top.len(), 3);
        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(top_matches(&corpus, "g", 0).unwrap().is_empty());
    }
}
