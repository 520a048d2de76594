use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog source unavailable: {path}: {reason}")]
    CatalogMissing { path: String, reason: String },

    #[error("Catalog is missing required column: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Load errors abort startup; nothing else in this crate is fatal.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::CatalogMissing { .. } | Error::MissingColumn(_) | Error::Csv(_) | Error::Io(_)
        )
    }
}
