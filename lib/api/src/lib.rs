//! REST presentation shell for recx.
//!
//! Exposes the live recommender over HTTP:
//!
//! - `GET  /health`
//! - `GET  /catalog` - item count, vocabulary size, thresholds
//! - `GET  /recommend?q=<text>&limit=<n>` - primary match and suggestions
//! - `POST /catalog/reload` - rebuild the index from the catalog source

pub mod rest;

pub use rest::{configure, ApiState, RestApi};
