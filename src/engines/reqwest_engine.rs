// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, HeaderSet, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{Duration, Instant};

/// 将请求头集合转换为reqwest的HeaderMap，无效字段被忽略
pub(crate) fn to_header_map(headers: &HeaderSet) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        if let (Ok(k), Ok(v)) = (
            HeaderName::from_bytes(k.as_bytes()),
            HeaderValue::from_str(v),
        ) {
            map.insert(k, v);
        }
    }
    map
}

/// 构建一次性的HTTP客户端
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, EngineError> {
    // Each request gets a fresh client for cookie isolation
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .cookie_store(true)
        .build()?;
    Ok(client)
}

/// 读取响应并封装为ScrapeResponse
pub(crate) async fn read_response(
    response: reqwest::Response,
    start: Instant,
) -> Result<ScrapeResponse, EngineError> {
    let status_code = response.status().as_u16();
    let content = response.text().await?;

    Ok(ScrapeResponse {
        status_code,
        content,
        response_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// 直连抓取引擎
///
/// 基于reqwest的静态HTTP抓取，不经过任何代理服务
pub struct ReqwestEngine;

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP GET
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 任意状态码的响应，由调用方判断是否成功
    /// * `Err(EngineError)` - 连接失败、超时等传输错误
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let client = build_client(request.timeout)?;

        let start = Instant::now();
        let response = client
            .get(&request.url)
            .headers(to_header_map(&request.headers))
            .send()
            .await?;

        read_response(response, start).await
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
