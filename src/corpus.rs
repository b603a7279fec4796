//! Ranked domain corpus.
//!
//! The corpus is an immutable, popularity-ordered list of domains. Entry `i`
//! (0-based, counting only kept entries) gets rank `i + 1`.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::types::DomainEntry;

/// Immutable rank-ordered domain list
#[derive(Debug, Clone)]
pub struct DomainCorpus {
    entries: Vec<DomainEntry>,
    skipped: usize,
}

impl DomainCorpus {
    /// Build a corpus from domains ordered by popularity.
    ///
    /// Entries are trimmed; empty entries are skipped and counted (see [`skipped`]).
    /// Fails with [`EngineError::EmptyCorpus`] if nothing usable remains.
    ///
    /// [`skipped`]: DomainCorpus::skipped
    pub fn load<I, S>(domains: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut skipped = 0;

        for raw in domains {
            let raw = raw.as_ref();
            let domain = raw.trim();
            if domain.is_empty() {
                skipped += 1;
                continue;
            }
            let rank = entries.len() + 1;
            if domain.len() != raw.len() {
                debug!(rank, domain, "trimmed whitespace around domain entry");
            }
            entries.push(DomainEntry::new(domain, rank));
        }

        if skipped > 0 {
            warn!(skipped, "skipped empty domain entries while loading corpus");
        }

        if entries.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        debug!(size = entries.len(), skipped, "loaded domain corpus");

        Ok(Self { entries, skipped })
    }

    /// Build a corpus from a JSON array of domain strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let domains: Vec<String> = serde_json::from_str(json)?;
        Self::load(domains)
    }

    /// Build a corpus from a text file with one domain per line.
    ///
    /// `#` starts a comment; blank lines are ignored and do not count as skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Parse the line-oriented corpus format used by [`from_file`](DomainCorpus::from_file).
    pub fn from_text(text: &str) -> Result<Self> {
        let domains = text
            .lines()
            .map(|line| match line.find('#') {
                Some(comment_pos) => &line[..comment_pos],
                None => line,
            })
            .map(str::trim)
            .filter(|line| !line.is_empty());
        Self::load(domains)
    }

    /// Number of domains (`N`, the popularity cutoff)
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Number of empty entries dropped during load
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Entry by 1-based rank
    pub fn get(&self, rank: usize) -> Option<&DomainEntry> {
        rank.checked_sub(1).and_then(|idx| self.entries.get(idx))
    }

    /// Entries in ascending rank order
    pub fn iter(&self) -> impl Iterator<Item = &DomainEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[DomainEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a DomainCorpus {
    type Item = &'a DomainEntry;
    type IntoIter = std::slice::Iter<'a, DomainEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_assigns_ranks() {
        let corpus = DomainCorpus::load(["google.com", "facebook.com", "bing.com"]).unwrap();
        assert_eq!(corpus.size(), 3);
        let ranks: Vec<(usize, &str)> = corpus
            .iter()
            .map(|e| (e.rank, e.domain.as_str()))
            .collect();
        assert_eq!(
            ranks,
            vec![(1, "google.com"), (2, "facebook.com"), (3, "bing.com")]
        );
    }

    #[test]
    fn test_load_empty_fails() {
        let err = DomainCorpus::load(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCorpus));
    }

    #[test]
    fn test_load_only_blank_entries_fails() {
        let err = DomainCorpus::load(["", "  "]).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCorpus));
    }

    #[test]
    fn test_load_skips_empty_entries() {
        let corpus = DomainCorpus::load(["google.com", "", "bing.com", "   "]).unwrap();
        assert_eq!(corpus.size(), 2);
        assert_eq!(corpus.skipped(), 2);
        // Ranks stay contiguous
        assert_eq!(corpus.get(2).unwrap().domain, "bing.com");
    }

    #[test]
    fn test_load_trims_surrounding_whitespace() {
        let corpus = DomainCorpus::load([" google.com ", "\tbing.com\n"]).unwrap();
        assert_eq!(corpus.size(), 2);
        assert_eq!(corpus.skipped(), 0);
        assert_eq!(corpus.get(1).unwrap().domain, "google.com");
        assert_eq!(corpus.get(2).unwrap().domain, "bing.com");
    }

    #[test]
    fn test_get_by_rank() {
        let corpus = DomainCorpus::load(["a.com", "b.com"]).unwrap();
        assert!(corpus.get(0).is_none());
        assert_eq!(corpus.get(1).unwrap().domain, "a.com");
        assert!(corpus.get(3).is_none());
    }

    #[test]
    fn test_from_json() {
        let corpus = DomainCorpus::from_json(r#"["google.com", "youtube.com"]"#).unwrap();
        assert_eq!(corpus.size(), 2);
        assert_eq!(corpus.get(2).unwrap().domain, "youtube.com");
    }

    #[test]
    fn test_from_json_invalid() {
        let err = DomainCorpus::from_json(r#"{"not": "a list"}"#).unwrap_err();
        assert!(matches!(err, EngineError::ParseError(_)));
    }

    #[test]
    fn test_from_text_comments_and_blank_lines() {
        let text = "
# top sites
google.com
youtube.com   # video

facebook.com
";
        let corpus = DomainCorpus::from_text(text).unwrap();
        assert_eq!(corpus.size(), 3);
        assert_eq!(corpus.skipped(), 0);
        assert_eq!(corpus.get(2).unwrap().domain, "youtube.com");
    }

    #[test]
    fn test_into_iterator() {
        let corpus = DomainCorpus::load(["a.com", "b.com"]).unwrap();
        let mut count = 0;
        for entry in &corpus {
            count += 1;
            assert_eq!(entry.rank, count);
        }
        assert_eq!(count, 2);
    }
}
