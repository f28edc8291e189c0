//! Score-weighted rejection sampling over an indexed record collection.
//!
//! The collection is never loaded as a whole: a draw picks a uniform offset,
//! fetches that one record, and keeps it with probability `weight / max_weight`.
//! Weights grow linearly with the record's score, so records at the top of
//! the score range are `max_weight` times likelier to be kept than records at
//! the bottom.

use rand::Rng;

use crate::error::CoreError;
use crate::types::{Record, WeightedRecord};

/// Default number of draws before falling back to the top-scored record.
pub const SAMPLE_ATTEMPTS: usize = 10;

/// How a sampled record was obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Accepted by a weighted draw.
    Sampled(Record),
    /// Every draw was rejected; this is the highest-scoring record.
    Fallback(Record),
}

impl Selection {
    pub fn record(&self) -> &Record {
        match self {
            Self::Sampled(record) | Self::Fallback(record) => record,
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            Self::Sampled(record) | Self::Fallback(record) => record,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Rejection sampler with a linear score-to-weight mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSampler {
    min_score: f64,
    max_score: f64,
    max_weight: f64,
    max_attempts: usize,
}

impl Default for WeightedSampler {
    /// Zipf frequency range of everyday vocabulary, top words ten times likelier.
    fn default() -> Self {
        Self {
            min_score: 4.0,
            max_score: 6.9,
            max_weight: 10.0,
            max_attempts: SAMPLE_ATTEMPTS,
        }
    }
}

impl WeightedSampler {
    pub fn new(min_score: f64, max_score: f64, max_weight: f64) -> crate::Result<Self> {
        if !(min_score.is_finite() && max_score.is_finite() && min_score < max_score) {
            return Err(CoreError::InvalidScoreRange {
                min: min_score,
                max: max_score,
            });
        }
        if !(max_weight.is_finite() && max_weight >= 1.0) {
            return Err(CoreError::InvalidMaxWeight(max_weight));
        }

        Ok(Self {
            min_score,
            max_score,
            max_weight,
            max_attempts: SAMPLE_ATTEMPTS,
        })
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> crate::Result<Self> {
        if max_attempts == 0 {
            return Err(CoreError::NoAttempts);
        }
        self.max_attempts = max_attempts;
        Ok(self)
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Acceptance weight for a score, from 1 at `min_score` to `max_weight`
    /// at `max_score`. Out-of-range scores are clamped first; NaN stays NaN
    /// and is never accepted.
    pub fn weight(&self, score: f64) -> f64 {
        let clamped = score.clamp(self.min_score, self.max_score);
        let t = (clamped - self.min_score) / (self.max_score - self.min_score);
        1.0 + (self.max_weight - 1.0) * t
    }

    /// Whether a record with this score survives one acceptance roll.
    pub fn accepts<R: Rng + ?Sized>(&self, score: f64, rng: &mut R) -> bool {
        rng.gen_range(0.0..self.max_weight) < self.weight(score)
    }

    /// Run the bounded rejection loop without any fallback.
    ///
    /// `fetch_one(offset)` returning `None` uses up the attempt. Fetch errors
    /// stop the loop and are returned unchanged.
    pub fn draw<R, E, F>(
        &self,
        total: usize,
        mut fetch_one: F,
        rng: &mut R,
    ) -> Result<Option<Record>, E>
    where
        R: Rng + ?Sized,
        F: FnMut(usize) -> Result<Option<WeightedRecord>, E>,
    {
        if total == 0 {
            return Ok(None);
        }

        for _ in 0..self.max_attempts {
            let offset = rng.gen_range(0..total);
            let Some(candidate) = fetch_one(offset)? else {
                continue;
            };
            if self.accepts(candidate.score, rng) {
                return Ok(Some(candidate.record));
            }
        }

        Ok(None)
    }

    /// Draw a record, falling back to `fetch_highest` when every draw is rejected.
    pub fn sample<R, E, F, G>(
        &self,
        total: usize,
        fetch_one: F,
        fetch_highest: G,
        rng: &mut R,
    ) -> Result<Option<Selection>, E>
    where
        R: Rng + ?Sized,
        F: FnMut(usize) -> Result<Option<WeightedRecord>, E>,
        G: FnOnce() -> Result<Option<Record>, E>,
    {
        if let Some(record) = self.draw(total, fetch_one, rng)? {
            return Ok(Some(Selection::Sampled(record)));
        }
        Ok(fetch_highest()?.map(Selection::Fallback))
    }
}
