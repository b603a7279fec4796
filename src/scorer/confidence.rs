use crate::corpus::DomainCorpus;
use crate::error::{EngineError, Result};
use crate::types::{MatchCandidate, ScoreBreakdown};

/// Edit distance similarity at or above which a missing substring is not penalized
pub const LEV_SUPPRESS_THRESHOLD: f64 = 0.60;

/// Per-signal weights used when aggregating a [`ScoreBreakdown`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub sub_score: f64,
    pub domain_lev_score: f64,
    pub domain_score: f64,
}

impl Weights {
    /// Base weights before any per-candidate adjustment
    pub const BASE: Weights = Weights {
        sub_score: 10.0,
        domain_lev_score: 5.0,
        domain_score: 5.0,
    };

    pub fn total(&self) -> f64 {
        self.sub_score + self.domain_lev_score + self.domain_score
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::BASE
    }
}

/// Scores candidates against a corpus of `cutoff` domains.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceScorer {
    cutoff: usize,
}

impl ConfidenceScorer {
    pub fn new(cutoff: usize) -> Self {
        Self { cutoff }
    }

    pub fn for_corpus(corpus: &DomainCorpus) -> Self {
        Self::new(corpus.size())
    }

    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Compute the three sub-scores of a candidate.
    pub fn breakdown(&self, candidate: &MatchCandidate) -> Result<ScoreBreakdown> {
        if candidate.domain.is_empty() {
            return Err(EngineError::InvalidCandidate(candidate.query.clone()));
        }
        if candidate.distance < 0 {
            return Err(EngineError::InvalidDistance(candidate.distance));
        }

        let domain_len = candidate.domain.chars().count() as f64;

        let dist_coeff = (candidate.distance as f64 / domain_len).min(1.0);
        let domain_lev_score = 1.0 - dist_coeff;

        // Quadratic popularity decay: rank 1 scores 1.0
        let domain_score = if self.cutoff == 0 {
            0.0
        } else {
            let n = self.cutoff as f64;
            let inv = self.cutoff.saturating_sub(candidate.rank.saturating_sub(1)) as f64;
            (inv * inv) / (n * n)
        };

        let sub_score = match candidate.substr_pos {
            Some(pos) => 1.0 - pos as f64 / domain_len,
            None => 0.0,
        };

        Ok(ScoreBreakdown {
            domain_lev_score,
            domain_score,
            sub_score,
        })
    }

    /// Weights for a breakdown. Near-misses that lack the query as a literal
    /// substring (typos) drop the substring weight entirely.
    pub fn weights_for(&self, breakdown: &ScoreBreakdown) -> Weights {
        let mut weights = Weights::BASE;
        if breakdown.sub_score == 0.0 && breakdown.domain_lev_score >= LEV_SUPPRESS_THRESHOLD {
            weights.sub_score = 0.0;
        }
        weights
    }

    /// Aggregate confidence in `[0, 1]`.
    pub fn score(&self, candidate: &MatchCandidate) -> Result<f64> {
        let breakdown = self.breakdown(candidate)?;
        Ok(self.aggregate(&breakdown))
    }

    /// Weighted mean of the sub-scores. Negative sub-scores add nothing to the
    /// numerator but their weight still counts.
    pub fn aggregate(&self, breakdown: &ScoreBreakdown) -> f64 {
        let weights = self.weights_for(breakdown);
        let weighted = [
            (breakdown.sub_score, weights.sub_score),
            (breakdown.domain_lev_score, weights.domain_lev_score),
            (breakdown.domain_score, weights.domain_score),
        ]
        .iter()
        .map(|&(score, weight)| score.max(0.0) * weight)
        .sum::<f64>();

        (weighted / weights.total()).max(0.0)
    }
}
