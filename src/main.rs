// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use prodcrawl::application::use_cases::batch_crawl::BatchCrawlUseCase;
use prodcrawl::config::seed_patterns::known_patterns;
use prodcrawl::config::settings::Settings;
use prodcrawl::domain::repositories::pattern_repository::PatternRepository;
use prodcrawl::domain::services::crawl_service::CrawlService;
use prodcrawl::domain::services::discovery_service::DiscoveryService;
use prodcrawl::engines::router::FetchGateway;
use prodcrawl::infrastructure::domain_list::load_domains;
use prodcrawl::infrastructure::pattern_store::JsonPatternStore;
use prodcrawl::infrastructure::result_writer::save_results;
use prodcrawl::utils::telemetry;
use std::sync::Arc;
use tracing::{info, warn};

/// 主函数
///
/// 读取域名列表，逐域名发现/复用模式并提取商品URL，最后写出结果文件
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting prodcrawl...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Pattern store
    let store = Arc::new(JsonPatternStore::new(&settings.crawler.patterns_file));
    if settings.crawler.seed_known_patterns {
        match store.seed(&known_patterns()).await {
            Ok(added) => info!("Seeded {} known domain(s) into pattern store", added),
            Err(e) => warn!("Failed to seed known patterns: {}", e),
        }
    }

    // 4. Fetch pipeline and services
    let fetcher = Arc::new(FetchGateway::from_settings(&settings));
    let discoverer = Arc::new(DiscoveryService::new(fetcher.clone()));
    let crawler = Arc::new(CrawlService::new(store, fetcher, discoverer));

    // 5. Crawl
    let domains = load_domains(&settings.crawler.domain_file).await;
    if domains.is_empty() {
        info!("No domains to crawl");
        return Ok(());
    }

    let use_case = BatchCrawlUseCase::new(crawler, settings.crawler.max_concurrent_crawls);
    let results = use_case.run(&domains).await;

    // 6. Persist results
    save_results(&results, &settings.crawler.output_file).await?;
    info!("Results written to {}", settings.crawler.output_file);

    Ok(())
}
