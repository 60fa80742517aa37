// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::fmt;

/// 单个域名爬取的结束原因
///
/// 只用于日志和测试，不影响输出的JSON结构
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// 已完成模式匹配（结果可能为空）
    Extracted,
    /// 既没有已存储的模式也未能发现新模式
    NoPatterns,
    /// 首页无法获取
    HomepageUnavailable,
    /// 爬取任务异常退出
    Aborted,
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CrawlOutcome::Extracted => "extracted",
            CrawlOutcome::NoPatterns => "no_patterns",
            CrawlOutcome::HomepageUnavailable => "homepage_unavailable",
            CrawlOutcome::Aborted => "aborted",
        };
        write!(f, "{}", s)
    }
}

/// 爬取结果
///
/// 一个域名对应一组匹配到的商品URL（按字符串精确去重）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// 域名
    pub domain: String,
    /// 匹配到的商品URL
    pub urls: HashSet<String>,
    /// 结束原因
    pub outcome: CrawlOutcome,
}

impl CrawlResult {
    pub fn extracted(domain: impl Into<String>, urls: HashSet<String>) -> Self {
        Self {
            domain: domain.into(),
            urls,
            outcome: CrawlOutcome::Extracted,
        }
    }

    /// 空结果
    pub fn empty(domain: impl Into<String>, outcome: CrawlOutcome) -> Self {
        Self {
            domain: domain.into(),
            urls: HashSet::new(),
            outcome,
        }
    }
}

/// 域名 → 商品URL集合
pub type CrawlResults = std::collections::HashMap<String, HashSet<String>>;
