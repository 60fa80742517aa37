// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const PAGE_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

fn browser_error(e: impl std::fmt::Display) -> EngineError {
    EngineError::Browser(e.to_string())
}

/// Playwright引擎
///
/// 基于chromiumoxide的无头浏览器渲染抓取。每次抓取启动独立的浏览器进程，
/// 返回前在所有路径上关闭页面和浏览器；连接远程Chrome时只关闭自己打开的页面。
pub struct PlaywrightEngine {
    remote_url: Option<String>,
}

impl PlaywrightEngine {
    pub fn new(remote_url: Option<String>) -> Self {
        Self { remote_url }
    }

    async fn open_browser(&self, timeout: Duration) -> Result<(Browser, HandlerGuard), EngineError> {
        let (browser, mut handler) = match &self.remote_url {
            Some(url) => {
                debug!("Connecting to remote Chrome instance at: {}", url);
                Browser::connect(url.as_str()).await.map_err(browser_error)?
            }
            None => {
                let config = BrowserConfig::builder()
                    .no_sandbox()
                    .request_timeout(timeout)
                    .arg("--disable-gpu")
                    .arg("--disable-dev-shm-usage")
                    .build()
                    .map_err(browser_error)?;
                Browser::launch(config).await.map_err(browser_error)?
            }
        };

        // Drive browser events until the connection goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, HandlerGuard(handler_task)))
    }

    async fn release(&self, mut browser: Browser, handler: HandlerGuard) {
        if self.remote_url.is_none() {
            match tokio::time::timeout(PAGE_CLOSE_TIMEOUT, browser.close()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => warn!("Failed to close browser: {}", e),
                Err(_) => warn!("Timed out closing browser"),
            }
            match tokio::time::timeout(PAGE_CLOSE_TIMEOUT, browser.wait()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => warn!("Failed to wait for browser exit: {}", e),
                Err(_) => warn!("Timed out waiting for browser exit"),
            }
        }
        drop(browser);
        drop(handler);
    }

    /// 打开浏览器、渲染页面并释放浏览器
    async fn fetch_rendered(&self, request: &ScrapeRequest) -> Result<String, EngineError> {
        let (browser, handler) = self.open_browser(request.timeout).await?;
        let result = render(&browser, request).await;
        self.release(browser, handler).await;
        result
    }
}

/// 事件循环任务，随引擎调用结束（包括超时被取消）一起终止
struct HandlerGuard(JoinHandle<()>);

impl Drop for HandlerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// 导航到目标页面并返回渲染后的HTML
async fn load_page(page: &Page, request: &ScrapeRequest) -> Result<String, EngineError> {
    let mut extra = request.headers.clone();
    let user_agent = extra
        .keys()
        .find(|k| k.eq_ignore_ascii_case("user-agent"))
        .cloned()
        .and_then(|k| extra.remove(&k));

    if let Some(ua) = user_agent {
        page.set_user_agent(ua.as_str()).await.map_err(browser_error)?;
    }

    if !extra.is_empty() {
        let headers = serde_json::to_value(&extra).map_err(browser_error)?;
        page.execute(SetExtraHttpHeadersParams::new(Headers::new(headers)))
            .await
            .map_err(browser_error)?;
    }

    // goto waits for the load event
    page.goto(request.url.as_str()).await.map_err(browser_error)?;
    page.content().await.map_err(browser_error)
}

async fn render(browser: &Browser, request: &ScrapeRequest) -> Result<String, EngineError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(browser_error)?;

    let content = load_page(&page, request).await;

    match tokio::time::timeout(PAGE_CLOSE_TIMEOUT, page.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!("Failed to close page: {}", e),
        Err(_) => debug!("Timed out closing page"),
    }

    content
}

#[async_trait]
impl ScraperEngine for PlaywrightEngine {
    /// 执行浏览器渲染抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求，`timeout` 约束整个过程（启动或连接浏览器、创建页面、导航）
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 渲染完成的文档HTML，状态码固定为200
    /// * `Err(EngineError)` - 浏览器启动、导航失败或超时
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        let start = Instant::now();

        // Dropping the browser on timeout kills a launched child process
        let content = tokio::time::timeout(request.timeout, self.fetch_rendered(request))
            .await
            .map_err(|_| EngineError::Timeout)??;

        Ok(ScrapeResponse {
            status_code: 200,
            content,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "playwright"
    }
}

#[cfg(test)]
#[path = "playwright_engine_test.rs"]
mod tests;
