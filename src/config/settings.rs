// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 进程启动时构建一次，之后以引用方式传入各组件
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 批量爬取配置
    pub crawler: CrawlerSettings,
    /// 抓取网关配置
    pub fetch: FetchSettings,
    /// ScrapeOps 配置
    pub scrapeops: ScrapeOpsSettings,
    /// ScrapingAnt 配置
    pub scrapingant: ScrapingAntSettings,
}

/// 批量爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 域名列表文件（每行一个域名）
    pub domain_file: String,
    /// 结果输出文件
    pub output_file: String,
    /// URL模式存储文件
    pub patterns_file: String,
    /// 最大并发域名数，0表示不限制
    pub max_concurrent_crawls: usize,
    /// 启动时写入已知站点的模式
    pub seed_known_patterns: bool,
}

/// 静态传输类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// 直接HTTP请求
    Direct,
    /// 通过ScrapeOps代理API
    Scrapeops,
    /// 通过ScrapingAnt API
    Scrapingant,
}

/// 抓取网关配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 静态传输类型
    pub transport: TransportKind,
    /// 静态抓取失败后是否使用无头浏览器
    pub use_dynamic_fallback: bool,
    /// 静态抓取超时（秒）
    pub static_timeout_secs: u64,
    /// 渲染抓取超时（秒）
    pub dynamic_timeout_secs: u64,
    /// 每次抓取请求的候选请求头数量
    pub header_candidates: usize,
    /// 远程Chrome调试地址
    pub remote_browser_url: Option<String>,
}

impl FetchSettings {
    pub fn static_timeout(&self) -> Duration {
        Duration::from_secs(self.static_timeout_secs)
    }

    pub fn dynamic_timeout(&self) -> Duration {
        Duration::from_secs(self.dynamic_timeout_secs)
    }
}

/// ScrapeOps 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeOpsSettings {
    /// API密钥
    pub api_key: Option<String>,
    /// 浏览器请求头API地址
    pub headers_api_url: String,
    /// 代理API地址
    pub proxy_api_url: String,
    /// 请求头API超时（秒）
    pub headers_timeout_secs: u64,
}

/// ScrapingAnt 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapingAntSettings {
    /// API密钥
    pub api_key: Option<String>,
    /// API地址
    pub api_url: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载代码默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `PRODCRAWL__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PRODCRAWL").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅包含默认值的配置
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Crawler
            .set_default("crawler.domain_file", "input/domains.txt")?
            .set_default("crawler.output_file", "output/product_urls.json")?
            .set_default("crawler.patterns_file", "url_patterns.json")?
            .set_default("crawler.max_concurrent_crawls", 0)?
            .set_default("crawler.seed_known_patterns", false)?
            // Fetch gateway
            .set_default("fetch.transport", "direct")?
            .set_default("fetch.use_dynamic_fallback", true)?
            .set_default("fetch.static_timeout_secs", 30)?
            .set_default("fetch.dynamic_timeout_secs", 60)?
            .set_default("fetch.header_candidates", 2)?
            // ScrapeOps
            .set_default(
                "scrapeops.headers_api_url",
                "https://headers.scrapeops.io/v1/browser-headers",
            )?
            .set_default("scrapeops.proxy_api_url", "https://proxy.scrapeops.io/v1/")?
            .set_default("scrapeops.headers_timeout_secs", 10)?
            // ScrapingAnt
            .set_default("scrapingant.api_url", "https://api.scrapingant.com/v2/general")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
