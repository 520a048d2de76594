//! # recx
//!
//! A content-based product recommender.
//!
//! Given a free-text description of what a shopper wants, recx returns the
//! catalog item whose text profile is closest to it, plus a ranked list of
//! further suggestions. Matching uses TF-IDF over Vietnamese-aware
//! normalized text and cosine similarity with a relevance cutoff.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! recx --catalog group6.csv --http-port 8501
//! curl 'http://localhost:8501/recommend?q=gi%C3%A0y%20nike&limit=5'
//! ```
//!
//! ### One-shot query
//!
//! ```bash
//! recx --catalog group6.csv --query "giày chạy bộ nike"
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use recx::prelude::*;
//!
//! let handle = CatalogHandle::open(CatalogSource::new("group6.csv")).unwrap();
//! let recommender = handle.current();
//! match recommender.recommend("áo khoác chống nước", 5) {
//!     Recommendation::Match { primary, suggestions } => {
//!         println!("{} ({:.3})", primary.name, primary.score);
//!         for item in suggestions {
//!             println!("  {} ({:.3})", item.name, item.score);
//!         }
//!     }
//!     Recommendation::NoMatch { message } => println!("{message}"),
//!     Recommendation::NoQuery => {}
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `recx-core` - Normalizer, profile builder, TF-IDF index, ranker
//! - `recx-catalog` - CSV catalog loading and atomic reload
//! - `recx-api` - REST API

// Re-export core types
pub use recx_core::{
    build_profile, CatalogItem, CatalogRecord, Error, ItemView, Lexicon, Normalizer,
    ProductFields, ProfileMode, QueryRanker, RankerConfig, Recommendation, Recommender, Result,
    ScoredItem, Segmenter, SparseVector, VectorSpaceIndex,
};

// Re-export catalog
pub use recx_catalog::{CatalogColumns, CatalogHandle, CatalogLoader, CatalogSource};

// Re-export API
pub use recx_api::{ApiState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CatalogHandle, CatalogSource, Error, ItemView, Normalizer, RankerConfig, Recommendation,
        Recommender, Result, VectorSpaceIndex,
    };
}
