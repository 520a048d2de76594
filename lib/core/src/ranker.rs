//! Query ranking against a built [`VectorSpaceIndex`]

use crate::error::{Error, Result};
use crate::index::VectorSpaceIndex;
use crate::normalize::Normalizer;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum similarity for an item to be returned
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Number of suggestions shown after the primary match
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Hard cap on the suggestion window
pub const DEFAULT_MAX_SUGGESTIONS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl RankerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.max_suggestions == 0 {
            return Err(Error::InvalidConfig(
                "max_suggestions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A catalog position with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredItem {
    pub index: usize,
    pub score: f32,
}

/// Scores every catalog row against a query
#[derive(Debug, Clone, Default)]
pub struct QueryRanker {
    config: RankerConfig,
}

impl QueryRanker {
    /// Wrap a config as-is; callers own its validity
    #[must_use]
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    /// Validate the config before wrapping it
    pub fn try_new(config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Similarity of the query to every row, in catalog order, unthresholded
    pub fn score_all(
        &self,
        normalizer: &Normalizer,
        index: &VectorSpaceIndex,
        query: &str,
    ) -> Vec<f32> {
        let normalized = normalizer.normalize_str(query);
        let query_vector = index.project(&normalized);
        if query_vector.is_empty() {
            return vec![0.0; index.document_count()];
        }
        index
            .rows()
            .map(|row| query_vector.cosine_similarity(row).clamp(0.0, 1.0))
            .collect()
    }

    /// Rank the catalog for a query.
    ///
    /// Items scoring strictly below the threshold are dropped, so an empty
    /// result means "no match". Ties keep catalog order.
    pub fn rank(
        &self,
        normalizer: &Normalizer,
        index: &VectorSpaceIndex,
        query: &str,
    ) -> Vec<ScoredItem> {
        if query.trim().is_empty() || index.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<ScoredItem> = self
            .score_all(normalizer, index, query)
            .into_iter()
            .enumerate()
            .map(|(index, score)| ScoredItem { index, score })
            .filter(|item| item.score >= self.config.threshold && item.score > 0.0)
            .collect();

        // sort_by is stable, so equal scores stay in catalog order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            query = %query,
            matches = ranked.len(),
            top_score = ranked.first().map(|r| r.score).unwrap_or(0.0),
            "Ranked query"
        );
        ranked
    }
}
