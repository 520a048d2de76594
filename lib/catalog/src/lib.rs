//! # recx Catalog
//!
//! Tabular catalog source for recx: reads CSV rows, validates the required
//! columns once at load time, and keeps the live [`Recommender`] behind a
//! single-writer barrier so a reload never exposes a half-built index.
//!
//! [`Recommender`]: recx_core::Recommender

pub mod loader;
pub mod handle;

pub use loader::{CatalogColumns, CatalogLoader};
pub use handle::{CatalogHandle, CatalogSource};
