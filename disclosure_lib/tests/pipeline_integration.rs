use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use disclosure_lib::dates;
use disclosure_lib::pipeline::{filter_by_date_range, sort_newest_first};
use disclosure_lib::types::{Disclosure, Exchange, ExchangeFilter};
use disclosure_lib::{
    run_query, transform, CategoryResolver, DatasetSource, FileDatasetSource, QueryParams,
    QueryPipeline, StaticDatasetSource,
};
use serde_json::json;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn pipeline() -> QueryPipeline<FileDatasetSource> {
    QueryPipeline::new(
        FileDatasetSource::new(fixtures_dir()),
        CategoryResolver::builtin().unwrap(),
    )
}

fn ids(disclosures: &[Disclosure]) -> Vec<&str> {
    disclosures.iter().map(|d| d.id.as_str()).collect()
}

/// Collects pages 1..N, stopping at the first page with `hasMore == false`.
fn all_pages<S: DatasetSource>(pipeline: &QueryPipeline<S>, params: QueryParams) -> Vec<Disclosure> {
    let mut collected = Vec::new();
    let mut page = 1;
    loop {
        let result = pipeline.query(&params.clone().with_page(page));
        collected.extend(result.disclosures);
        if !result.has_more {
            return collected;
        }
        page += 1;
    }
}

#[test]
fn test_first_and_second_page_of_merged_set() {
    let pipeline = pipeline();

    let first = pipeline.query(&QueryParams::default());
    assert_eq!(first.disclosures.len(), 10);
    assert!(first.has_more);
    assert_eq!(first.total, 15);
    assert!(first.error.is_none());

    let second = pipeline.query(&QueryParams::default().with_page(2));
    assert_eq!(second.disclosures.len(), 5);
    assert!(!second.has_more);
    assert_eq!(second.total, 15);
}

#[test]
fn test_merged_order_newest_first_with_stable_ties() {
    let all = all_pages(&pipeline(), QueryParams::default());
    assert_eq!(
        ids(&all),
        vec![
            "hk-0001", "sz-0001", "sz-0002", "hk-0002", "sz-0003", "hk-0003", "sz-0004",
            "hk-0004", "sz-0005", "sz-0006", "hk-0005", "sz-0007", "hk-0006", "sz-0008",
            "hk-0007",
        ]
    );
}

#[test]
fn test_pages_concatenate_without_gaps_or_duplicates() {
    let pipeline = pipeline();
    let filters = [
        QueryParams::default(),
        QueryParams::default().with_exchange(Exchange::Shenzhen),
        QueryParams::default().with_exchange(Exchange::Hongkong),
        QueryParams::default().with_start_date("2024-01-05"),
        QueryParams::default()
            .with_start_date("2024-01-02")
            .with_end_date("2024-01-12"),
    ];

    for params in filters {
        let total = pipeline.query(&params).total;
        let pages = all_pages(&pipeline, params.clone());
        assert_eq!(pages.len(), total, "{:?}", params);

        let unique: HashSet<&str> = pages.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(unique.len(), pages.len(), "{:?}", params);

        let mut expected = filter_by_date_range(
            pipeline.load(&params.exchange),
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        );
        sort_newest_first(&mut expected);
        assert_eq!(pages, expected, "{:?}", params);
    }
}

#[test]
fn test_every_page_is_sorted_by_instant() {
    let pipeline = pipeline();
    for page in 1..=2 {
        let result = pipeline.query(&QueryParams::default().with_page(page));
        for pair in result.disclosures.windows(2) {
            let a = dates::parse_instant(&pair[0].date).unwrap();
            let b = dates::parse_instant(&pair[1].date).unwrap();
            assert!(a >= b, "{} before {}", pair[0].id, pair[1].id);
        }
    }
}

#[test]
fn test_date_range_is_inclusive_by_calendar_day() {
    let params = QueryParams::default()
        .with_start_date("2024-01-15")
        .with_end_date("2024-01-15");
    let result = pipeline().query(&params);

    // sz-0001 is at 23:30 UTC and still counts as the 15th.
    assert_eq!(ids(&result.disclosures), vec!["sz-0001", "sz-0002", "hk-0002"]);
    assert_eq!(result.total, 3);
    assert!(!result.has_more);

    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let ranged = all_pages(
        &pipeline(),
        QueryParams::default()
            .with_start_date("2024-01-03")
            .with_end_date("2024-01-10"),
    );
    assert!(!ranged.is_empty());
    for disclosure in &ranged {
        let day = dates::parse_instant(&disclosure.date).unwrap().date_naive();
        assert!(start <= day && day <= end, "{}", disclosure.id);
    }
}

#[test]
fn test_unparsable_bound_excludes_everything() {
    let result = pipeline().query(&QueryParams::default().with_start_date("last week"));
    assert!(result.disclosures.is_empty());
    assert!(!result.has_more);
    assert_eq!(result.total, 0);
}

#[test]
fn test_merge_is_shenzhen_then_hongkong() {
    let pipeline = pipeline();
    let merged = pipeline.load(&ExchangeFilter::All);
    let mut expected = pipeline.load(&ExchangeFilter::Only(Exchange::Shenzhen));
    expected.extend(pipeline.load(&ExchangeFilter::Only(Exchange::Hongkong)));
    assert_eq!(merged, expected);
    assert_eq!(merged.len(), 15);
}

#[test]
fn test_single_exchange_filter() {
    let result = pipeline().query(&QueryParams::default().with_exchange(Exchange::Hongkong));
    assert_eq!(result.total, 7);
    assert!(!result.has_more);
    assert!(result
        .disclosures
        .iter()
        .all(|d| d.exchange == Exchange::Hongkong));
}

#[test]
fn test_unrecognized_exchange_yields_empty_page() {
    let params = QueryParams::from_request(Some("NYSE"), None, None, None);
    let result = pipeline().query(&params);
    assert!(result.disclosures.is_empty());
    assert!(!result.has_more);
    assert_eq!(result.total, 0);
}

#[test]
fn test_page_past_end_is_empty() {
    let result = pipeline().query(&QueryParams::default().with_page(5));
    assert!(result.disclosures.is_empty());
    assert!(!result.has_more);
    assert_eq!(result.total, 15);
}

#[test]
fn test_empty_exchange_equals_other_exchange_alone() {
    let categories = CategoryResolver::builtin().unwrap();
    let files = FileDatasetSource::new(fixtures_dir());
    let shenzhen = files.load(Exchange::Shenzhen).unwrap();

    let one_empty = QueryPipeline::new(
        StaticDatasetSource::new()
            .with_dataset(Exchange::Shenzhen, shenzhen)
            .with_dataset(Exchange::Hongkong, json!({ "data": { "getDisclosure": [] } })),
        categories.clone(),
    );
    let reference = pipeline();

    for page in 1..=2 {
        let all = one_empty.query(&QueryParams::default().with_page(page));
        let only = reference.query(
            &QueryParams::default()
                .with_exchange(Exchange::Shenzhen)
                .with_page(page),
        );
        assert_eq!(all, only);
    }
}

#[test]
fn test_missing_dataset_file_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(
        fixtures_dir().join("hongkong.json"),
        dir.path().join("hongkong.json"),
    )
    .unwrap();

    let pipeline = QueryPipeline::new(
        FileDatasetSource::new(dir.path()),
        CategoryResolver::builtin().unwrap(),
    );
    let result = pipeline.query(&QueryParams::default());
    assert_eq!(result.total, 7);
    assert!(result.error.is_none());
}

#[test]
fn test_transform_fixture_is_repeatable() {
    let categories = CategoryResolver::builtin().unwrap();
    let dataset = FileDatasetSource::new(fixtures_dir())
        .load(Exchange::Shenzhen)
        .unwrap();
    let first = transform(&dataset, Exchange::Shenzhen, &categories);
    let second = transform(&dataset, Exchange::Shenzhen, &categories);
    assert_eq!(first, second);

    let hikvision = first.iter().find(|d| d.id == "sz-0007").unwrap();
    assert_eq!(hikvision.sec_name, "하이크비전");
    assert_eq!(hikvision.sec_code, "");
    assert_eq!(hikvision.category, "정정공시");

    let unknown = first.iter().find(|d| d.id == "sz-0008").unwrap();
    assert_eq!(unknown.category, "");
}

#[tokio::test]
async fn test_run_query_on_blocking_pool() {
    let pipeline = Arc::new(pipeline());
    let params = QueryParams::from_request(Some("SHENZHEN"), None, None, Some("1"));
    let result = run_query(pipeline, params).await.unwrap();
    assert_eq!(result.total, 8);
    assert_eq!(result.disclosures[0].id, "sz-0001");
}
