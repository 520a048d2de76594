//! Query-time facade over a frozen catalog
//!
//! A [`Recommender`] is built once from catalog records and is immutable
//! afterwards, so it can be shared behind an `Arc` by any number of
//! concurrent callers. Each call computes its own result; there is no
//! shared scratch state.

use crate::error::Result;
use crate::index::VectorSpaceIndex;
use crate::normalize::Normalizer;
use crate::profile::{CatalogItem, CatalogRecord, ProfileMode};
use crate::ranker::{QueryRanker, RankerConfig, ScoredItem};
use serde::Serialize;
use tracing::info;

/// What the presentation layer shows for one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: usize,
    pub name: String,
    pub description: String,
    pub price: String,
    pub brand: String,
    pub rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub score: f32,
}

impl ItemView {
    fn new(item: &CatalogItem, score: f32) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.clone(),
            brand: item.brand.clone(),
            rating: item.rating.clone(),
            image: item.image.clone(),
            score,
        }
    }
}

/// Outcome of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    /// Empty input: nothing was computed
    NoQuery,
    /// Nothing reached the relevance threshold
    NoMatch { message: String },
    Match {
        primary: ItemView,
        suggestions: Vec<ItemView>,
    },
}

pub const NO_MATCH_MESSAGE: &str = "Không tìm thấy sản phẩm phù hợp.";

impl Recommendation {
    #[must_use]
    pub fn no_match() -> Self {
        Recommendation::NoMatch {
            message: NO_MATCH_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Recommendation::Match { .. })
    }

    #[must_use]
    pub fn primary(&self) -> Option<&ItemView> {
        match self {
            Recommendation::Match { primary, .. } => Some(primary),
            _ => None,
        }
    }

    #[must_use]
    pub fn suggestions(&self) -> &[ItemView] {
        match self {
            Recommendation::Match { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// Catalog, index and ranking settings bundled for query time
#[derive(Debug, Clone)]
pub struct Recommender {
    items: Vec<CatalogItem>,
    normalizer: Normalizer,
    index: VectorSpaceIndex,
    ranker: QueryRanker,
}

impl Recommender {
    /// Profile every record and build the index.
    ///
    /// Fails with [`Error::InvalidConfig`] when `config` does not validate.
    pub fn new(
        records: Vec<CatalogRecord>,
        normalizer: Normalizer,
        config: RankerConfig,
    ) -> Result<Self> {
        Self::with_profile_mode(records, normalizer, config, ProfileMode::Full)
    }

    pub fn with_profile_mode(
        records: Vec<CatalogRecord>,
        normalizer: Normalizer,
        config: RankerConfig,
        mode: ProfileMode,
    ) -> Result<Self> {
        let ranker = QueryRanker::try_new(config)?;
        let items: Vec<CatalogItem> = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| CatalogItem::from_record(id, record, &normalizer, mode))
            .collect();
        let profiles: Vec<&str> = items.iter().map(|item| item.profile.as_str()).collect();
        let index = VectorSpaceIndex::build(&profiles);

        info!(items = items.len(), ?mode, "Recommender ready");

        Ok(Self {
            items,
            normalizer,
            index,
            ranker,
        })
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn index(&self) -> &VectorSpaceIndex {
        &self.index
    }

    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub fn config(&self) -> &RankerConfig {
        self.ranker.config()
    }

    /// Full thresholded ranking
    pub fn rank(&self, query: &str) -> Vec<ScoredItem> {
        self.ranker.rank(&self.normalizer, &self.index, query)
    }

    /// Best match plus up to `window` further suggestions.
    ///
    /// The window is capped by the configured `max_suggestions`.
    pub fn recommend(&self, query: &str, window: usize) -> Recommendation {
        if query.trim().is_empty() {
            return Recommendation::NoQuery;
        }

        let ranked = self.rank(query);
        let Some((best, rest)) = ranked.split_first() else {
            return Recommendation::no_match();
        };

        let window = window.min(self.config().max_suggestions);
        let view = |scored: &ScoredItem| ItemView::new(&self.items[scored.index], scored.score);

        Recommendation::Match {
            primary: view(best),
            suggestions: rest.iter().take(window).map(view).collect(),
        }
    }
}
