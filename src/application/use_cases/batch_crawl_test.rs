// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Records the peak number of crawls running at once
struct CountingCrawler {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl CountingCrawler {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl DomainCrawler for CountingCrawler {
    async fn crawl(&self, domain: &str) -> CrawlResult {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        CrawlResult::extracted(
            domain,
            HashSet::from([format!("https://{}/p/1", domain)]),
        )
    }
}

struct PanickyCrawler;

#[async_trait]
impl DomainCrawler for PanickyCrawler {
    async fn crawl(&self, domain: &str) -> CrawlResult {
        if domain == "bad.test" {
            panic!("simulated crawler failure");
        }
        CrawlResult::extracted(domain, HashSet::from([format!("https://{}/p/1", domain)]))
    }
}

fn domains(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_limit_of_one_serializes_crawls() {
    let crawler = CountingCrawler::new();
    let use_case = BatchCrawlUseCase::new(crawler.clone(), 1);

    let results = use_case
        .run(&domains(&["a.test", "b.test", "c.test"]))
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(crawler.peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_zero_limit_runs_everything_at_once() {
    let crawler = CountingCrawler::new();
    let use_case = BatchCrawlUseCase::new(crawler.clone(), 0);

    use_case
        .run(&domains(&["a.test", "b.test", "c.test", "d.test"]))
        .await;

    assert_eq!(crawler.peak.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_panicking_domain_yields_empty_set() {
    let use_case = BatchCrawlUseCase::new(Arc::new(PanickyCrawler), 2);

    let results = use_case.run(&domains(&["good.test", "bad.test"])).await;

    assert_eq!(results.len(), 2);
    assert!(results["bad.test"].is_empty());
    assert!(results["good.test"].contains("https://good.test/p/1"));
}

#[tokio::test]
async fn test_duplicate_domains_are_merged() {
    let use_case = BatchCrawlUseCase::new(Arc::new(PanickyCrawler), 0);

    let results = use_case.run(&domains(&["a.test", "a.test"])).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results["a.test"].len(), 1);
}

#[tokio::test]
async fn test_empty_domain_list() {
    let use_case = BatchCrawlUseCase::new(CountingCrawler::new(), 3);
    assert!(use_case.run(&[]).await.is_empty());
}
