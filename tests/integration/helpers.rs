// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use prodcrawl::domain::repositories::pattern_repository::PatternRepository;
use prodcrawl::domain::services::crawl_service::CrawlService;
use prodcrawl::domain::services::discovery_service::DiscoveryService;
use prodcrawl::engines::router::PageFetcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 内存中的站点集合，未登记的URL视为不可达
pub struct FakeSites {
    pages: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl FakeSites {
    pub fn new(pages: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeSites {
    async fn fetch(&self, url: &str) -> Option<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.pages.get(url).cloned()
    }
}

/// 用真实的发现服务装配爬取服务
pub fn build_crawler(
    store: Arc<dyn PatternRepository>,
    sites: Arc<FakeSites>,
) -> Arc<CrawlService> {
    let discoverer = Arc::new(DiscoveryService::new(sites.clone()));
    Arc::new(CrawlService::new(store, sites, discoverer))
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
