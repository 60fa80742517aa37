// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlOutcome, CrawlResult};
use crate::domain::repositories::pattern_repository::PatternRepository;
use crate::domain::services::discovery_service::PatternDiscoverer;
use crate::domain::services::extraction_service::{extract_product_urls, PatternSet};
use crate::engines::router::PageFetcher;
use crate::utils::url_utils::homepage_url;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use url::Url;

/// 单域名爬取特质
///
/// 实现方必须为每个域名返回一个结果（可能为空），不得返回错误
#[async_trait]
pub trait DomainCrawler: Send + Sync {
    async fn crawl(&self, domain: &str) -> CrawlResult;
}

/// 爬取服务
///
/// 单个域名的处理流程：查找模式 →（缺失时）发现并持久化 → 抓取首页 → 提取商品URL。
/// 所有失败都降级为空结果并记录日志。
pub struct CrawlService {
    /// 模式仓库
    store: Arc<dyn PatternRepository>,
    /// 页面抓取
    fetcher: Arc<dyn PageFetcher>,
    /// 模式发现
    discoverer: Arc<dyn PatternDiscoverer>,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `store` - 模式仓库
    /// * `fetcher` - 页面抓取网关
    /// * `discoverer` - 模式发现服务
    pub fn new(
        store: Arc<dyn PatternRepository>,
        fetcher: Arc<dyn PageFetcher>,
        discoverer: Arc<dyn PatternDiscoverer>,
    ) -> Self {
        Self {
            store,
            fetcher,
            discoverer,
        }
    }

    /// 读取已存储的模式，存储不可读时视为空
    async fn stored_patterns(&self, domain: &str) -> Vec<String> {
        match self.store.patterns_for(domain).await {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!("Pattern store unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// 确保有可用模式：优先使用已存储的，否则发现并持久化
    async fn resolve_patterns(&self, domain: &str) -> Vec<String> {
        let stored = self.stored_patterns(domain).await;
        if !stored.is_empty() {
            return stored;
        }

        info!("No patterns found for '{}'. Auto-detecting...", domain);
        let discovered = self.discoverer.discover(domain).await;
        if discovered.is_empty() {
            return discovered;
        }

        if let Err(e) = self.store.merge(domain, &discovered).await {
            // Patterns are still used for this run, only reuse is lost
            warn!("Failed to persist patterns for {}: {}", domain, e);
        }
        discovered
    }

    async fn run(&self, domain: &str) -> CrawlResult {
        info!("Starting crawl for {}", domain);

        let patterns = self.resolve_patterns(domain).await;
        if patterns.is_empty() {
            info!("No patterns discovered for '{}'. Returning empty set.", domain);
            return CrawlResult::empty(domain, CrawlOutcome::NoPatterns);
        }

        let base_url = homepage_url(domain);
        let Ok(base) = Url::parse(&base_url) else {
            warn!("Invalid homepage URL {}", base_url);
            return CrawlResult::empty(domain, CrawlOutcome::HomepageUnavailable);
        };

        let Some(html) = self.fetcher.fetch(&base_url).await else {
            info!("Could not fetch {}. Returning empty set.", base_url);
            return CrawlResult::empty(domain, CrawlOutcome::HomepageUnavailable);
        };

        let urls = extract_product_urls(&html, &base, &PatternSet::compile(&patterns));
        info!(
            "Finished crawl for {}. Found {} product URLs.",
            domain,
            urls.len()
        );
        CrawlResult::extracted(domain, urls)
    }
}

#[async_trait]
impl DomainCrawler for CrawlService {
    async fn crawl(&self, domain: &str) -> CrawlResult {
        self.run(domain)
            .instrument(info_span!("crawl", domain = %domain))
            .await
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
