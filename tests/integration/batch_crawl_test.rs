// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_crawler, strings, FakeSites};
use prodcrawl::application::use_cases::batch_crawl::BatchCrawlUseCase;
use prodcrawl::infrastructure::pattern_store::InMemoryPatternStore;
use prodcrawl::infrastructure::result_writer::save_results;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tempfile::TempDir;

const SHOP_HOME: &str = r#"
    <html><body>
        <a href="/product/red-shirt">Red</a>
        <a href="/product/blue-shirt?size=m">Blue</a>
        <a href="/contact">Contact</a>
    </body></html>
"#;

#[tokio::test]
async fn test_failing_domain_does_not_affect_others() {
    // a.com is unreachable
    let sites = FakeSites::new(&[("https://b.com", SHOP_HOME)]);
    let crawler = build_crawler(Arc::new(InMemoryPatternStore::new()), sites);
    let use_case = BatchCrawlUseCase::new(crawler, 2);

    let results = use_case.run(&strings(&["a.com", "b.com"])).await;

    assert_eq!(results.len(), 2);
    assert!(results["a.com"].is_empty());
    assert_eq!(
        results["b.com"],
        HashSet::from([
            "https://b.com/product/red-shirt".to_string(),
            "https://b.com/product/blue-shirt?size=m".to_string(),
        ])
    );
}

#[tokio::test]
async fn test_batch_results_are_written_as_json() {
    let sites = FakeSites::new(&[("https://b.com", SHOP_HOME)]);
    let crawler = build_crawler(Arc::new(InMemoryPatternStore::new()), sites);
    let use_case = BatchCrawlUseCase::new(crawler, 0);
    let results = use_case.run(&strings(&["a.com", "b.com"])).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("product_urls.json");
    save_results(&results, &path).await.unwrap();

    let written: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["a.com"], Vec::<String>::new());
    assert_eq!(written["b.com"].len(), 2);
}
