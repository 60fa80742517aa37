// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::extraction_service::LinkDiscoverer;
use crate::engines::router::PageFetcher;
use crate::utils::url_utils::homepage_url;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// 常见商品URL词汇后接一个路径段，例如 `/dp/B08L5WHFT9`、`/product/blue-shirt`
static PRODUCT_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(dp|product|p|item|sku|buy)/([\w-]+)")
        .expect("Failed to compile product segment regex")
});

/// 模式发现特质
#[async_trait]
pub trait PatternDiscoverer: Send + Sync {
    /// 为域名推导模式，返回空列表表示发现失败
    async fn discover(&self, domain: &str) -> Vec<String>;
}

/// 将单个商品路径段泛化为正则表达式
///
/// 纯数字的段生成数字规则，否则生成字母数字/连字符/下划线规则
fn generalize(token: &str, slug: &str) -> String {
    let token = regex::escape(token);
    if slug.chars().all(|c| c.is_ascii_digit()) {
        format!("/{}/[0-9]+", token)
    } else {
        format!("/{}/[A-Za-z0-9_-]+", token)
    }
}

/// 从候选链接推导模式
///
/// 只检查链接的路径部分；相同形状的链接合并为同一个模式
pub fn derive_patterns<'a>(links: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut patterns = BTreeSet::new();
    for link in links {
        let Ok(url) = Url::parse(link) else {
            continue;
        };
        if let Some(caps) = PRODUCT_SEGMENT.captures(url.path()) {
            patterns.insert(generalize(&caps[1], &caps[2]));
        }
    }
    patterns.into_iter().collect()
}

/// 模式发现服务
///
/// 抓取域名首页，按启发式筛选商品样式的链接，再泛化为可复用的正则模式。
/// 只使用该域名自己的首页样本，不做跨域学习。
pub struct DiscoveryService {
    fetcher: Arc<dyn PageFetcher>,
}

impl DiscoveryService {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PatternDiscoverer for DiscoveryService {
    async fn discover(&self, domain: &str) -> Vec<String> {
        info!("Attempting to find product patterns for {}", domain);

        let home = homepage_url(domain);
        let Ok(base) = Url::parse(&home) else {
            info!("Invalid homepage URL for {}", domain);
            return Vec::new();
        };

        let Some(html) = self.fetcher.fetch(&home).await else {
            info!("Could not fetch homepage for {}", domain);
            return Vec::new();
        };

        let links = LinkDiscoverer::extract_links(&html, &base);
        debug!("Found {} candidate links on {}", links.len(), home);

        let derived = derive_patterns(&links);
        if derived.is_empty() {
            info!("No product-like links found for {}", domain);
        } else {
            info!(
                "Derived {} pattern(s) for {}: {:?}",
                derived.len(),
                domain,
                derived
            );
        }
        derived
    }
}
