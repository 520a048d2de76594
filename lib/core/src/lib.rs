//! # recx Core
//!
//! Core library for the recx content-based recommender.
//!
//! This crate provides the text pipeline and the ranking algorithms:
//!
//! - [`Normalizer`] - Lowercasing, punctuation stripping and Vietnamese word segmentation
//! - [`build_profile`] - Searchable profile text for one catalog row
//! - [`VectorSpaceIndex`] - TF-IDF vector space built once over the catalog
//! - [`QueryRanker`] - Cosine ranking with a relevance threshold
//! - [`Recommender`] - Primary match plus suggestions for the presentation layer
//!
//! ## Example
//!
//! ```rust
//! use recx_core::{CatalogRecord, Normalizer, ProductFields, RankerConfig, Recommender};
//!
//! let records = vec![CatalogRecord {
//!     fields: ProductFields {
//!         name: Some("Nike Air Max".to_string()),
//!         description: Some("Giày chạy bộ".to_string()),
//!         keywords: Some("giày;chạy bộ".to_string()),
//!         brand: Some("Nike".to_string()),
//!     },
//!     ..Default::default()
//! }];
//!
//! let recommender = Recommender::new(records, Normalizer::default(), RankerConfig::default())?;
//! let result = recommender.recommend("giày nike", 5);
//! assert!(result.is_match());
//! # Ok::<(), recx_core::Error>(())
//! ```

pub mod error;
pub mod segment;
pub mod normalize;
pub mod profile;
pub mod vector;
pub mod index;
pub mod ranker;
pub mod recommender;

pub use error::{Error, Result};
pub use segment::{Lexicon, Segmenter};
pub use normalize::Normalizer;
pub use profile::{build_profile, CatalogItem, CatalogRecord, ProductFields, ProfileMode};
pub use vector::SparseVector;
pub use index::VectorSpaceIndex;
pub use ranker::{
    QueryRanker, RankerConfig, ScoredItem, DEFAULT_MAX_SUGGESTIONS, DEFAULT_SUGGESTIONS,
    DEFAULT_THRESHOLD,
};
pub use recommender::{ItemView, Recommendation, Recommender};
