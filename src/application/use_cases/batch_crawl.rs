// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlOutcome, CrawlResult, CrawlResults};
use crate::domain::services::crawl_service::DomainCrawler;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// 批量爬取用例
///
/// 每个域名独立运行一个任务，可选地用信号量限制同时在途的数量。
/// 单个域名的失败（包括任务崩溃）只影响该域名自己的结果。
pub struct BatchCrawlUseCase {
    crawler: Arc<dyn DomainCrawler>,
    /// 并发上限，为空表示不限制
    limiter: Option<Arc<Semaphore>>,
}

impl BatchCrawlUseCase {
    /// 创建批量爬取用例
    ///
    /// # 参数
    ///
    /// * `crawler` - 单域名爬取实现
    /// * `max_concurrent` - 最大并发域名数，0 表示不限制
    pub fn new(crawler: Arc<dyn DomainCrawler>, max_concurrent: usize) -> Self {
        let limiter = (max_concurrent > 0).then(|| Arc::new(Semaphore::new(max_concurrent)));
        Self { crawler, limiter }
    }

    /// 爬取所有域名
    ///
    /// # 参数
    ///
    /// * `domains` - 域名列表，允许重复
    ///
    /// # 返回值
    ///
    /// 每个输入域名都会出现在结果中；重复的域名合并其URL集合
    pub async fn run(&self, domains: &[String]) -> CrawlResults {
        info!("Crawling {} domains", domains.len());

        let handles = domains.iter().map(|domain| {
            let crawler = self.crawler.clone();
            let limiter = self.limiter.clone();
            let domain = domain.clone();
            tokio::spawn(async move {
                // Held until the crawl finishes
                let _permit = match limiter {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                crawler.crawl(&domain).await
            })
        });

        let joined = join_all(handles).await;

        let mut results = CrawlResults::new();
        for (domain, outcome) in domains.iter().zip(joined) {
            let result = outcome.unwrap_or_else(|e| {
                error!("Crawl task for {} aborted: {}", domain, e);
                CrawlResult::empty(domain.as_str(), CrawlOutcome::Aborted)
            });
            info!(
                "{}: {} ({} product URLs)",
                result.domain,
                result.outcome,
                result.urls.len()
            );
            results
                .entry(result.domain)
                .or_insert_with(HashSet::new)
                .extend(result.urls);
        }

        let total: usize = results.values().map(HashSet::len).sum();
        info!(
            "Batch finished: {} domains, {} product URLs",
            results.len(),
            total
        );
        results
    }
}

#[cfg(test)]
#[path = "batch_crawl_test.rs"]
mod tests;
