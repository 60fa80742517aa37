// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::CrawlResults;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// 将爬取结果写入JSON文件
///
/// 输出为 `{ "domain": ["url", ...] }`。URL来自无序集合，这里排序后输出
/// 只是为了文件内容稳定，不代表任何语义顺序。
pub async fn save_results(results: &CrawlResults, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let ordered: BTreeMap<&str, Vec<&str>> = results
        .iter()
        .map(|(domain, urls)| {
            let mut urls: Vec<&str> = urls.iter().map(String::as_str).collect();
            urls.sort_unstable();
            (domain.as_str(), urls)
        })
        .collect();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let data = serde_json::to_string_pretty(&ordered)?;
    fs::write(path, data).await?;

    info!("Results successfully saved to {}", path.display());
    Ok(())
}
