//! High-score list - the best scores, highest first

use arrayvec::ArrayVec;

use crate::types::MAX_HIGH_SCORES;

/// Descending list of at most [`MAX_HIGH_SCORES`] scores
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighScoreList {
    scores: ArrayVec<u32, MAX_HIGH_SCORES>,
}

impl HighScoreList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from stored scores, sorting and truncating as needed
    pub fn from_scores<I: IntoIterator<Item = u32>>(scores: I) -> Self {
        let mut all: Vec<u32> = scores.into_iter().collect();
        all.sort_unstable_by(|a, b| b.cmp(a));
        all.truncate(MAX_HIGH_SCORES);
        Self {
            scores: all.into_iter().collect(),
        }
    }

    /// Insert `score` at its rank.
    ///
    /// Returns true iff the list changed and now contains the score.
    pub fn insert(&mut self, score: u32) -> bool {
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        if pos >= MAX_HIGH_SCORES {
            return false;
        }
        if self.scores.is_full() {
            self.scores.pop();
        }
        self.scores.insert(pos, score);
        true
    }

    /// Whether `score` would enter the list
    pub fn qualifies(&self, score: u32) -> bool {
        !self.scores.is_full() || self.scores.iter().any(|&s| score > s)
    }

    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
