// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::url_utils::{is_http, resolve_url};
use regex::RegexSet;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::warn;
use url::Url;

/// 链接发现器
///
/// 从HTML中收集所有锚点链接并解析为绝对URL
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 从HTML内容中提取链接
    ///
    /// # 参数
    ///
    /// * `html_content` - HTML内容
    /// * `base_url` - 用于解析相对链接的基础URL
    ///
    /// # 返回值
    ///
    /// 去重后的绝对URL集合。URL不做额外规范化（查询参数、末尾斜杠、片段均保留），
    /// 仅差异于这些部分的URL视为不同的URL。
    pub fn extract_links(html_content: &str, base_url: &Url) -> HashSet<String> {
        let mut links = HashSet::new();
        let Ok(selector) = Selector::parse("a[href]") else {
            return links;
        };

        let document = Html::parse_document(html_content);
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            // mailto:, javascript: and similar are never product pages
            if let Ok(url) = resolve_url(base_url, href.trim()) {
                if is_http(&url) {
                    links.insert(url.to_string());
                }
            }
        }

        links
    }
}

/// 编译后的模式集合
///
/// 无效的正则表达式会被跳过并记录警告，不会导致整个集合失效
pub struct PatternSet {
    set: RegexSet,
}

impl PatternSet {
    pub fn compile(patterns: &[String]) -> Self {
        let valid: Vec<&str> = patterns
            .iter()
            .filter(|p| match regex::Regex::new(p) {
                Ok(_) => true,
                Err(e) => {
                    warn!("Skipping invalid URL pattern {:?}: {}", p, e);
                    false
                }
            })
            .map(String::as_str)
            .collect();

        let set = RegexSet::new(&valid).unwrap_or_else(|e| {
            warn!("Failed to build pattern set: {}", e);
            RegexSet::empty()
        });
        Self { set }
    }

    /// 非锚定搜索：模式命中URL的任意子串即可
    pub fn is_match(&self, url: &str) -> bool {
        self.set.is_match(url)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

/// 从HTML中提取匹配任一模式的商品URL
///
/// 对相同输入始终返回相同的集合
pub fn extract_product_urls(html: &str, base_url: &Url, patterns: &PatternSet) -> HashSet<String> {
    if patterns.is_empty() {
        return HashSet::new();
    }

    LinkDiscoverer::extract_links(html, base_url)
        .into_iter()
        .filter(|link| patterns.is_match(link))
        .collect()
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
