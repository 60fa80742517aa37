// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{ScrapeOpsSettings, ScrapingAntSettings};
use crate::engines::reqwest_engine::{build_client, read_response, to_header_map};
use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use std::time::Instant;

/// ScrapeOps 代理抓取引擎
///
/// 将目标URL转交给 ScrapeOps 代理API，由其完成实际请求
pub struct ScrapeOpsEngine {
    api_url: String,
    api_key: String,
}

impl ScrapeOpsEngine {
    /// 创建引擎，缺少API密钥时返回配置错误
    pub fn new(settings: &ScrapeOpsSettings) -> Result<Self, EngineError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| EngineError::Config("SCRAPEOPS api_key is not set".to_string()))?;
        Ok(Self {
            api_url: settings.proxy_api_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ScraperEngine for ScrapeOpsEngine {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let client = build_client(request.timeout)?;

        let start = Instant::now();
        let response = client
            .get(&self.api_url)
            .query(&[("api_key", self.api_key.as_str()), ("url", request.url.as_str())])
            .headers(to_header_map(&request.headers))
            .send()
            .await?;

        read_response(response, start).await
    }

    fn name(&self) -> &'static str {
        "scrapeops"
    }
}

/// ScrapingAnt 抓取引擎
///
/// API密钥通过 `x-api-key` 请求头传递
pub struct ScrapingAntEngine {
    api_url: String,
    api_key: String,
}

impl ScrapingAntEngine {
    /// 创建引擎，缺少API密钥时返回配置错误
    pub fn new(settings: &ScrapingAntSettings) -> Result<Self, EngineError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| EngineError::Config("SCRAPINGANT api_key is not set".to_string()))?;
        Ok(Self {
            api_url: settings.api_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ScraperEngine for ScrapingAntEngine {
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let client = build_client(request.timeout)?;

        let mut headers = request.headers.clone();
        headers.insert("x-api-key".to_string(), self.api_key.clone());

        let start = Instant::now();
        let response = client
            .get(&self.api_url)
            .query(&[("url", request.url.as_str())])
            .headers(to_header_map(&headers))
            .send()
            .await?;

        read_response(response, start).await
    }

    fn name(&self) -> &'static str {
        "scrapingant"
    }
}
