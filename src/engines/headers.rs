// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ScrapeOpsSettings;
use crate::engines::traits::{EngineError, HeaderSet};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// 固定的兜底请求头
pub fn fallback_headers() -> HeaderSet {
    let mut headers = HeaderSet::new();
    headers.insert("User-Agent".to_string(), FALLBACK_USER_AGENT.to_string());
    headers
}

/// 请求头轮换来源
///
/// 返回若干组候选请求头，由抓取网关每次随机选取一组
#[async_trait]
pub trait HeaderSource: Send + Sync {
    /// 获取至多 `count` 组请求头，不可用时返回空列表
    async fn headers(&self, count: usize) -> Vec<HeaderSet>;
}

/// 只提供兜底请求头的来源
pub struct StaticHeaderSource;

#[async_trait]
impl HeaderSource for StaticHeaderSource {
    async fn headers(&self, _count: usize) -> Vec<HeaderSet> {
        vec![fallback_headers()]
    }
}

#[derive(Debug, Deserialize)]
struct BrowserHeadersResponse {
    #[serde(default)]
    result: Vec<HeaderSet>,
}

/// ScrapeOps 浏览器请求头API
pub struct ScrapeOpsHeaderSource {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ScrapeOpsHeaderSource {
    /// 根据配置创建请求头来源
    ///
    /// 未配置API密钥时退化为 [`StaticHeaderSource`]，不会导致启动失败
    pub fn from_settings(settings: &ScrapeOpsSettings) -> Box<dyn HeaderSource> {
        let api_key = match settings.api_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                debug!("SCRAPEOPS api_key not set, using fallback headers");
                return Box::new(StaticHeaderSource);
            }
        };

        match reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.headers_timeout_secs))
            .build()
        {
            Ok(client) => Box::new(Self {
                client,
                api_url: settings.headers_api_url.clone(),
                api_key,
            }),
            Err(e) => {
                warn!("Failed to build header API client: {}", e);
                Box::new(StaticHeaderSource)
            }
        }
    }

    async fn fetch(&self, count: usize) -> Result<Vec<HeaderSet>, EngineError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("api_key", self.api_key.clone()),
                ("num_results", count.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: BrowserHeadersResponse = response.json().await?;
        Ok(body.result)
    }
}

#[async_trait]
impl HeaderSource for ScrapeOpsHeaderSource {
    async fn headers(&self, count: usize) -> Vec<HeaderSet> {
        match self.fetch(count).await {
            Ok(headers) => headers,
            Err(e) => {
                warn!("Error fetching headers from ScrapeOps: {}", e);
                Vec::new()
            }
        }
    }
}
