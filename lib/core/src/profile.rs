//! Catalog items and their searchable text profiles

use crate::normalize::Normalizer;
use serde::{Deserialize, Serialize};

/// Delimiter used inside the raw keyword column
pub const KEYWORD_DELIMITER: char = ';';

/// Text-bearing fields of one catalog row, each possibly missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub brand: Option<String>,
}

/// Which fields go through the normalizer when building a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileMode {
    /// Normalize every field and keyword
    #[default]
    Full,
    /// Legacy behavior: only keywords are cleaned, the other fields are
    /// concatenated verbatim. Case differences in names then leak into the
    /// vocabulary, so this is kept for comparison only.
    KeywordsOnly,
}

/// Split the raw keyword column into its keyword groups, dropping blanks
pub fn split_keywords(raw: &str) -> Vec<&str> {
    raw.split(KEYWORD_DELIMITER)
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect()
}

/// Build the canonical profile for a row
pub fn build_profile(normalizer: &Normalizer, fields: &ProductFields) -> String {
    build_profile_with_mode(normalizer, fields, ProfileMode::Full)
}

/// Build a profile, normalizing each field and each keyword on its own.
///
/// Segmentation never crosses a field or keyword boundary, so
/// `giày;chạy bộ` contributes the two tokens `giày` and `chạy_bộ`.
pub fn build_profile_with_mode(
    normalizer: &Normalizer,
    fields: &ProductFields,
    mode: ProfileMode,
) -> String {
    let name = fields.name.as_deref().unwrap_or("");
    let description = fields.description.as_deref().unwrap_or("");
    let keywords = split_keywords(fields.keywords.as_deref().unwrap_or(""));
    let brand = fields.brand.as_deref().unwrap_or("");

    let keyword_pieces = keywords.iter().map(|k| normalizer.normalize_str(k));
    let pieces: Vec<String> = match mode {
        ProfileMode::Full => {
            let clean = |text: &str| normalizer.normalize_str(text);
            std::iter::once(clean(name))
                .chain(std::iter::once(clean(description)))
                .chain(keyword_pieces)
                .chain(std::iter::once(clean(brand)))
                .collect()
        }
        ProfileMode::KeywordsOnly => std::iter::once(name.to_string())
            .chain(std::iter::once(description.to_string()))
            .chain(keyword_pieces)
            .chain(std::iter::once(brand.to_string()))
            .collect(),
    };

    pieces
        .iter()
        .flat_map(|piece| piece.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One catalog row with its cached profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Row position in the source
    pub id: usize,
    pub name: String,
    pub description: String,
    pub keywords: String,
    pub brand: String,
    /// Display value as found in the source, e.g. "1.290.000đ"
    pub price: String,
    pub rating: String,
    pub image: Option<String>,
    pub profile: String,
}

/// A raw row before profiling. Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub fields: ProductFields,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub image: Option<String>,
}

impl CatalogItem {
    /// Apply the "missing means empty" rule and build the profile
    pub fn from_record(
        id: usize,
        record: CatalogRecord,
        normalizer: &Normalizer,
        mode: ProfileMode,
    ) -> Self {
        let profile = build_profile_with_mode(normalizer, &record.fields, mode);
        let ProductFields { name, description, keywords, brand } = record.fields;
        let image = record
            .image
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            id,
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            keywords: keywords.unwrap_or_default(),
            brand: brand.unwrap_or_default(),
            price: record.price.unwrap_or_default(),
            rating: record.rating.unwrap_or_default(),
            image,
            profile,
        }
    }
}
