// Integration tests for recx: CSV catalog through to recommendations
use recx_catalog::{CatalogHandle, CatalogLoader, CatalogSource};
use recx_core::{
    Normalizer, RankerConfig, Recommendation, Recommender, VectorSpaceIndex,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

fn sample_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_catalog.csv")
}

fn open_sample() -> CatalogHandle {
    CatalogHandle::open(CatalogSource::new(sample_catalog())).unwrap()
}

#[test]
fn test_sample_catalog_loads() {
    let handle = open_sample();
    let recommender = handle.current();
    assert_eq!(recommender.items().len(), 12);
    assert!(!recommender.index().is_empty());
    assert!(recommender.items().iter().all(|item| !item.profile.is_empty()));
    assert_eq!(
        recommender.items()[0].image.as_deref(),
        Some("https://example.com/img/nike-air-max-90.jpg")
    );
    assert_eq!(recommender.items()[1].image, None);
}

#[test]
fn test_vietnamese_query() {
    let handle = open_sample();
    let result = handle.current().recommend("túi xách da Gucci", 5);

    let primary = result.primary().expect("expected a match");
    assert_eq!(primary.name, "Gucci Ophidia");
    assert_eq!(primary.price, "45.000.000");
    assert!(primary.score > 0.1);
}

#[test]
fn test_query_case_and_accents_are_normalized() {
    let handle = open_sample();
    let recommender = handle.current();
    let lower = recommender.recommend("áo khoác chống nước", 5);
    let upper = recommender.recommend("ÁO KHOÁC, CHỐNG NƯỚC!", 5);
    assert_eq!(lower, upper);
    assert_eq!(lower.primary().unwrap().name, "Adidas Windbreaker");
}

#[test]
fn test_suggestions_are_ranked_and_thresholded() {
    let handle = open_sample();
    let recommender = handle.current();
    let threshold = recommender.config().threshold;
    let result = recommender.recommend("giày chạy bộ nike", 5);

    let primary = result.primary().unwrap();
    assert_eq!(primary.brand, "Nike");

    let suggestions = result.suggestions();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);
    let mut previous = primary.score;
    for item in suggestions {
        assert!(item.score >= threshold);
        assert!(item.score <= previous);
        assert_ne!(item.id, primary.id);
        previous = item.score;
    }
}

#[test]
fn test_keyword_query_finds_every_tagged_item() {
    let handle = open_sample();
    let recommender = handle.current();
    let tagged: Vec<usize> = recommender
        .items()
        .iter()
        .filter(|item| item.keywords.split(';').any(|k| k.trim() == "giày"))
        .map(|item| item.id)
        .collect();
    assert_eq!(tagged.len(), 6);

    let ranked = recommender.rank("giày");
    for id in &tagged {
        assert!(
            ranked.iter().any(|r| r.index == *id),
            "{} missing from results",
            recommender.items()[*id].name
        );
    }
    assert!(ranked.iter().all(|r| tagged.contains(&r.index)));
}

#[test]
fn test_nonsense_query_has_no_match() {
    let handle = open_sample();
    let result = handle.current().recommend("xyz123nonsense", 5);
    assert!(matches!(result, Recommendation::NoMatch { .. }));
}

#[test]
fn test_empty_query_short_circuits() {
    let handle = open_sample();
    assert_eq!(handle.current().recommend("", 5), Recommendation::NoQuery);
}

#[test]
fn test_self_similarity_across_catalog() {
    let handle = open_sample();
    let recommender = handle.current();
    for item in recommender.items() {
        let query = format!("{} {}", item.name, item.description);
        let ranked = recommender.rank(&query);
        assert!(!ranked.is_empty(), "no result for {}", item.name);
        let position = ranked.iter().position(|r| r.index == item.id);
        assert!(
            matches!(position, Some(p) if p < 3),
            "{} ranked at {:?}",
            item.name,
            position
        );
    }
}

#[test]
fn test_identical_profiles_tie_in_catalog_order() {
    let csv = "Tên sản phẩm,Mô tả,Từ khóa,Thương hiệu\n\
               Áo thun trơn,Cotton,áo thun,Basic\n\
               Quần short,Kaki,quần short,Other\n\
               Áo thun trơn,Cotton,áo thun,Basic\n";
    let records = CatalogLoader::default().load_reader(csv.as_bytes()).unwrap();
    let recommender = Recommender::new(records, Normalizer::default(), RankerConfig::default()).unwrap();

    let ranked = recommender.rank("áo thun cotton");
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].index, 0);
    assert_eq!(ranked[1].index, 2);
    assert_eq!(ranked[0].score, ranked[1].score);
}

#[test]
fn test_determinism() {
    let handle = open_sample();
    let recommender = handle.current();
    let first = recommender.rank("giày sneaker da");
    for _ in 0..10 {
        assert_eq!(recommender.rank("giày sneaker da"), first);
    }
}

#[test]
fn test_normalization_is_shared_with_index() {
    let normalizer = Normalizer::default();
    let raw = "Giày Thể Thao Nike; chạy bộ";
    let profile = normalizer.normalize_str(raw);
    let index = VectorSpaceIndex::build(&[profile.clone()]);
    let query = index.project(&normalizer.normalize_str(raw));
    let row = index.row(0).unwrap();
    assert!((query.cosine_similarity(row) - 1.0).abs() < 1e-5);
}

#[test]
fn test_concurrent_queries_share_index() {
    let handle = Arc::new(open_sample());
    let expected = handle.current().recommend("áo polo công sở", 5);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            std::thread::spawn(move || handle.current().recommend("áo polo công sở", 5))
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), expected);
    }
}

#[test]
fn test_catalog_without_text_signal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Tên sản phẩm,Mô tả,Từ khóa,Thương hiệu").unwrap();
    writeln!(file, ",,,").unwrap();
    writeln!(file, "!!!,...,;;,-").unwrap();

    let handle = CatalogHandle::open(CatalogSource::new(file.path())).unwrap();
    let recommender = handle.current();
    assert!(recommender.index().is_empty());
    assert!(matches!(
        recommender.recommend("giày", 5),
        Recommendation::NoMatch { .. }
    ));
}
