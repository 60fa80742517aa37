// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{build_crawler, strings, FakeSites};
use prodcrawl::config::seed_patterns::known_patterns;
use prodcrawl::domain::repositories::pattern_repository::PatternRepository;
use prodcrawl::domain::services::crawl_service::DomainCrawler;
use prodcrawl::infrastructure::pattern_store::JsonPatternStore;
use std::sync::Arc;
use tempfile::TempDir;

const HOME: &str = r#"
    <a href="/dp/B08L5WHFT9">One</a>
    <a href="/dp/B09XJTEST1">Two</a>
    <a href="/about">About</a>
"#;

#[tokio::test]
async fn test_discovered_patterns_are_reused_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("url_patterns.json");

    // First run discovers and persists
    let sites = FakeSites::new(&[("https://shop.test", HOME)]);
    let crawler = build_crawler(Arc::new(JsonPatternStore::new(&path)), sites.clone());
    let first = crawler.crawl("shop.test").await;
    assert_eq!(first.urls.len(), 2);
    // Discovery and extraction each fetch the homepage
    assert_eq!(sites.fetch_count(), 2);

    let store = JsonPatternStore::new(&path);
    assert_eq!(
        store.patterns_for("shop.test").await.unwrap(),
        strings(&["/dp/[A-Za-z0-9_-]+"])
    );

    // Second run with a fresh store instance skips discovery
    let sites = FakeSites::new(&[("https://shop.test", HOME)]);
    let crawler = build_crawler(Arc::new(store), sites.clone());
    let second = crawler.crawl("shop.test").await;
    assert_eq!(second.urls, first.urls);
    assert_eq!(sites.fetch_count(), 1);
}

#[tokio::test]
async fn test_seeded_domain_skips_discovery() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonPatternStore::new(dir.path().join("url_patterns.json")));
    let added = store.seed(&known_patterns()).await.unwrap();
    assert_eq!(added, known_patterns().len());

    let sites = FakeSites::new(&[(
        "https://amazon.in",
        r#"<a href="/dp/B08L5WHFT9?ref=home">x</a><a href="/deals">y</a>"#,
    )]);
    let crawler = build_crawler(store, sites.clone());
    let result = crawler.crawl("amazon.in").await;

    assert_eq!(result.urls.len(), 1);
    assert!(result.urls.contains("https://amazon.in/dp/B08L5WHFT9?ref=home"));
    assert_eq!(sites.fetch_count(), 1);
}

#[tokio::test]
async fn test_seed_does_not_replace_learned_patterns() {
    let dir = TempDir::new().unwrap();
    let store = JsonPatternStore::new(dir.path().join("url_patterns.json"));
    store
        .merge("amazon.in", &strings(&["/custom/[0-9]+"]))
        .await
        .unwrap();

    let added = store.seed(&known_patterns()).await.unwrap();

    assert_eq!(added, known_patterns().len() - 1);
    assert_eq!(
        store.patterns_for("amazon.in").await.unwrap(),
        strings(&["/custom/[0-9]+"])
    );
}
