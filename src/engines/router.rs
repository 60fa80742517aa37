// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{FetchSettings, Settings, TransportKind};
use crate::engines::headers::{fallback_headers, HeaderSource, ScrapeOpsHeaderSource};
use crate::engines::playwright_engine::PlaywrightEngine;
use crate::engines::proxy_engine::{ScrapeOpsEngine, ScrapingAntEngine};
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{EngineError, HeaderSet, ScrapeRequest, ScraperEngine};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// 页面获取能力
///
/// 返回页面HTML；所有失败都是软失败，以 `None` 表示"该URL没有可用数据"
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// 根据配置选择静态传输引擎
///
/// 代理服务缺少API密钥时退化为直连，不会导致启动失败
pub fn build_static_engine(settings: &Settings) -> Arc<dyn ScraperEngine> {
    let engine: Result<Arc<dyn ScraperEngine>, EngineError> = match settings.fetch.transport {
        TransportKind::Direct => Ok(Arc::new(ReqwestEngine)),
        TransportKind::Scrapeops => {
            ScrapeOpsEngine::new(&settings.scrapeops).map(|e| Arc::new(e) as Arc<dyn ScraperEngine>)
        }
        TransportKind::Scrapingant => ScrapingAntEngine::new(&settings.scrapingant)
            .map(|e| Arc::new(e) as Arc<dyn ScraperEngine>),
    };

    engine.unwrap_or_else(|e| {
        warn!("{}, falling back to direct transport", e);
        Arc::new(ReqwestEngine)
    })
}

/// 抓取网关
///
/// 两阶段策略：先用静态传输，失败后（且启用时）再用无头浏览器渲染。
/// 每次抓取从请求头来源随机选取一组请求头，来源不可用时使用兜底请求头。
pub struct FetchGateway {
    /// 静态传输
    static_engine: Arc<dyn ScraperEngine>,
    /// 渲染传输，为空表示禁用动态回退
    dynamic_engine: Option<Arc<dyn ScraperEngine>>,
    /// 请求头轮换来源
    header_source: Arc<dyn HeaderSource>,
    /// 每次请求的候选请求头数量
    header_candidates: usize,
    static_timeout: Duration,
    dynamic_timeout: Duration,
}

impl FetchGateway {
    /// 使用指定组件创建抓取网关
    ///
    /// # 参数
    ///
    /// * `static_engine` - 静态传输引擎
    /// * `dynamic_engine` - 渲染传输引擎（None 表示不回退）
    /// * `header_source` - 请求头来源
    /// * `settings` - 超时与候选数量配置
    pub fn new(
        static_engine: Arc<dyn ScraperEngine>,
        dynamic_engine: Option<Arc<dyn ScraperEngine>>,
        header_source: Arc<dyn HeaderSource>,
        settings: &FetchSettings,
    ) -> Self {
        Self {
            static_engine,
            dynamic_engine,
            header_source,
            header_candidates: settings.header_candidates.max(1),
            static_timeout: settings.static_timeout(),
            dynamic_timeout: settings.dynamic_timeout(),
        }
    }

    /// 根据应用配置装配抓取网关
    pub fn from_settings(settings: &Settings) -> Self {
        let static_engine = build_static_engine(settings);
        let dynamic_engine: Option<Arc<dyn ScraperEngine>> = if settings.fetch.use_dynamic_fallback
        {
            Some(Arc::new(PlaywrightEngine::new(
                settings.fetch.remote_browser_url.clone(),
            )))
        } else {
            None
        };
        let header_source: Arc<dyn HeaderSource> =
            Arc::from(ScrapeOpsHeaderSource::from_settings(&settings.scrapeops));

        info!(
            "Fetch gateway using {} transport, dynamic fallback {}",
            static_engine.name(),
            if dynamic_engine.is_some() { "enabled" } else { "disabled" }
        );

        Self::new(static_engine, dynamic_engine, header_source, &settings.fetch)
    }

    /// 选取本次请求使用的请求头
    async fn pick_headers(&self) -> HeaderSet {
        let candidates = self.header_source.headers(self.header_candidates).await;
        candidates
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(fallback_headers)
    }

    /// 用单个引擎尝试一次，任何失败都记录并返回 None
    async fn attempt(&self, engine: &dyn ScraperEngine, request: &ScrapeRequest) -> Option<String> {
        let engine_name = engine.name();
        let start = Instant::now();

        match engine.scrape(request).await {
            Ok(response) if response.is_success() && !response.content.is_empty() => {
                debug!(
                    "Engine {} fetched {} in {:?}",
                    engine_name,
                    request.url,
                    start.elapsed()
                );
                Some(response.content)
            }
            Ok(response) => {
                warn!(
                    "Engine {} failed for {}: status {}",
                    engine_name, request.url, response.status_code
                );
                None
            }
            Err(e) if e.is_timeout() => {
                warn!(
                    "Engine {} timed out for {} after {:?}",
                    engine_name, request.url, request.timeout
                );
                None
            }
            Err(e) => {
                warn!("Engine {} error for {}: {}", engine_name, request.url, e);
                None
            }
        }
    }
}

#[async_trait]
impl PageFetcher for FetchGateway {
    async fn fetch(&self, url: &str) -> Option<String> {
        let headers = self.pick_headers().await;

        let request = ScrapeRequest::new(url, headers.clone(), self.static_timeout);
        if let Some(html) = self.attempt(self.static_engine.as_ref(), &request).await {
            return Some(html);
        }

        if let Some(dynamic) = &self.dynamic_engine {
            info!("Falling back to dynamic fetch for {}", url);
            let request = ScrapeRequest::new(url, headers, self.dynamic_timeout);
            if let Some(html) = self.attempt(dynamic.as_ref(), &request).await {
                return Some(html);
            }
        }

        warn!("Could not fetch {}", url);
        None
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
