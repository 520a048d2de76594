//! CSV catalog loading
//!
//! Column names are matched case-sensitively after trimming. The text
//! columns are required; price, rating and image are optional.

use recx_core::{CatalogRecord, Error, ProductFields, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const BOM: char = '\u{feff}';

/// Header names of the catalog columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumns {
    pub name: String,
    pub description: String,
    pub keywords: String,
    pub brand: String,
    pub price: String,
    pub rating: String,
    pub image: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            name: "Tên sản phẩm".to_string(),
            description: "Mô tả".to_string(),
            keywords: "Từ khóa".to_string(),
            brand: "Thương hiệu".to_string(),
            price: "Giá".to_string(),
            rating: "Điểm đánh giá".to_string(),
            image: "Link ảnh".to_string(),
        }
    }
}

/// Positions of the catalog columns in one particular file
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    name: usize,
    description: usize,
    keywords: usize,
    brand: usize,
    price: Option<usize>,
    rating: Option<usize>,
    image: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &csv::StringRecord, columns: &CatalogColumns) -> Result<Self> {
        let headers: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches(BOM).trim())
            .collect();
        let find = |wanted: &str| headers.iter().position(|h| *h == wanted);
        let require = |wanted: &str| find(wanted).ok_or_else(|| Error::MissingColumn(wanted.to_string()));

        Ok(Self {
            name: require(columns.name.as_str())?,
            description: require(columns.description.as_str())?,
            keywords: require(columns.keywords.as_str())?,
            brand: require(columns.brand.as_str())?,
            price: find(columns.price.as_str()),
            rating: find(columns.rating.as_str()),
            image: find(columns.image.as_str()),
        })
    }

    fn record(&self, row: &csv::StringRecord) -> CatalogRecord {
        let cell = |pos: usize| {
            row.get(pos)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let optional = |pos: Option<usize>| pos.and_then(|p| cell(p));

        CatalogRecord {
            fields: ProductFields {
                name: cell(self.name),
                description: cell(self.description),
                keywords: cell(self.keywords),
                brand: cell(self.brand),
            },
            price: optional(self.price),
            rating: optional(self.rating),
            image: optional(self.image),
        }
    }
}

/// Reads catalog rows from CSV
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    columns: CatalogColumns,
}

impl CatalogLoader {
    #[must_use]
    pub fn new(columns: CatalogColumns) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &CatalogColumns {
        &self.columns
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<CatalogRecord>> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::CatalogMissing {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let records = self.load_reader(file)?;
        info!(path = %path.display(), rows = records.len(), "Catalog loaded");
        Ok(records)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<CatalogRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::Csv(format!("Failed to read headers: {e}")))?
            .clone();
        let layout = ColumnLayout::resolve(&headers, &self.columns)?;
        debug!(?layout, "Resolved catalog columns");

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| Error::Csv(format!("row {}: {e}", line + 1)))?;
            records.push(layout.record(&row));
        }
        Ok(records)
    }
}
