use crate::loader::{CatalogColumns, CatalogLoader};
use parking_lot::RwLock;
use recx_core::{Lexicon, Normalizer, ProfileMode, RankerConfig, Recommender, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Where a catalog comes from and how it is indexed
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub path: PathBuf,
    pub columns: CatalogColumns,
    /// Extra word list merged into the built-in lexicon
    pub dictionary: Option<PathBuf>,
    pub config: RankerConfig,
    pub profile_mode: ProfileMode,
}

impl CatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            columns: CatalogColumns::default(),
            dictionary: None,
            config: RankerConfig::default(),
            profile_mode: ProfileMode::default(),
        }
    }

    pub fn with_dictionary<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dictionary = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_config(mut self, config: RankerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_columns(mut self, columns: CatalogColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Load the rows and build a fresh recommender
    pub fn build(&self) -> Result<Recommender> {
        let mut lexicon = Lexicon::builtin();
        if let Some(dictionary) = &self.dictionary {
            let added = lexicon.extend_from_path(dictionary)?;
            info!(path = %dictionary.display(), added, "Dictionary merged");
        }

        let records = CatalogLoader::new(self.columns.clone()).load_path(&self.path)?;
        Recommender::with_profile_mode(
            records,
            Normalizer::with_lexicon(lexicon),
            self.config,
            self.profile_mode,
        )
    }
}

/// Holds the live recommender and swaps it atomically on reload.
///
/// Readers clone the inner `Arc`, so a query that started before a reload
/// finishes against the index it started with.
pub struct CatalogHandle {
    source: CatalogSource,
    current: RwLock<Arc<Recommender>>,
}

impl CatalogHandle {
    /// Build the initial index. Failure here is fatal for the caller.
    pub fn open(source: CatalogSource) -> Result<Self> {
        let started = Instant::now();
        let recommender = source.build()?;
        info!(
            items = recommender.items().len(),
            vocabulary = recommender.index().vocabulary_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog index ready"
        );
        Ok(Self {
            source,
            current: RwLock::new(Arc::new(recommender)),
        })
    }

    /// Wrap an already-built recommender; `reload` still reads `source`
    pub fn from_recommender(source: CatalogSource, recommender: Recommender) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(recommender)),
        }
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Snapshot of the live recommender
    #[must_use]
    pub fn current(&self) -> Arc<Recommender> {
        self.current.read().clone()
    }

    /// Rebuild from the source and swap it in.
    ///
    /// The build runs without holding the lock. On error the previous
    /// index stays live and the error is returned.
    pub fn reload(&self) -> Result<Arc<Recommender>> {
        let started = Instant::now();
        let rebuilt = match self.source.build() {
            Ok(recommender) => Arc::new(recommender),
            Err(e) => {
                error!(error = %e, "Catalog reload failed; keeping previous index");
                return Err(e);
            }
        };

        *self.current.write() = rebuilt.clone();
        info!(
            items = rebuilt.items().len(),
            vocabulary = rebuilt.index().vocabulary_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog reloaded"
        );
        Ok(rebuilt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recx_core::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Tên sản phẩm,Mô tả,Từ khóa,Thương hiệu,Giá,Điểm đánh giá,Link ảnh";

    fn write_catalog(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}").expect("write header");
        for row in rows {
            writeln!(file, "{row}").expect("write row");
        }
        file.flush().expect("flush");
        file
    }

    #[test]
    fn test_open_and_query() {
        let file = write_catalog(&["Nike Air Max,Giày chạy bộ,giày;chạy bộ,Nike,2.500.000,4.8,"]);
        let handle = CatalogHandle::open(CatalogSource::new(file.path())).unwrap();
        let result = handle.current().recommend("giày chạy bộ nike", 5);
        assert!(result.is_match());
    }

    #[test]
    fn test_open_missing_file() {
        let result = CatalogHandle::open(CatalogSource::new("/nonexistent/catalog.csv"));
        assert!(matches!(result, Err(Error::CatalogMissing { .. })));
    }

    #[test]
    fn test_open_rejects_bad_config() {
        let file = write_catalog(&["A,B,C,D,1,1,"]);
        let source = CatalogSource::new(file.path())
            .with_config(RankerConfig { threshold: -1.0, ..Default::default() });
        assert!(matches!(CatalogHandle::open(source), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_dictionary_extends_segmentation() {
        let file = write_catalog(&["Xe đạp địa hình,Khung nhôm,xe đạp,Giant,,,"]);
        let mut words = NamedTempFile::new().expect("temp file");
        writeln!(words, "xe đạp\nđịa hình\nkhung nhôm").expect("write words");

        let source = CatalogSource::new(file.path()).with_dictionary(words.path());
        let handle = CatalogHandle::open(source).unwrap();
        let current = handle.current();
        assert_eq!(
            current.items()[0].profile,
            "xe_đạp địa_hình khung_nhôm xe_đạp giant"
        );
    }

    #[test]
    fn test_reload_swaps_index() {
        let file = write_catalog(&["Nike Air,Running,shoe,Nike,,,"]);
        let handle = CatalogHandle::open(CatalogSource::new(file.path())).unwrap();
        let before = handle.current();
        assert_eq!(before.items().len(), 1);

        let mut appended = std::fs::OpenOptions::new()
            .append(true)
            .open(file.path())
            .unwrap();
        writeln!(appended, "Gucci Bag,Leather,bag,Gucci,,,").unwrap();

        let after = handle.reload().unwrap();
        assert_eq!(after.items().len(), 2);
        assert_eq!(handle.current().items().len(), 2);
        // the old snapshot is untouched
        assert_eq!(before.items().len(), 1);
        assert!(!before.recommend("gucci bag", 5).is_match());
        assert!(handle.current().recommend("gucci bag", 5).is_match());
    }

    #[test]
    fn test_failed_reload_keeps_previous() {
        let file = write_catalog(&["Nike Air,Running,shoe,Nike,,,"]);
        let path = file.path().to_path_buf();
        let handle = CatalogHandle::open(CatalogSource::new(&path)).unwrap();

        std::fs::write(&path, "wrong,header\n1,2\n").unwrap();
        assert!(matches!(handle.reload(), Err(Error::MissingColumn(_))));
        assert_eq!(handle.current().items().len(), 1);
    }
}
