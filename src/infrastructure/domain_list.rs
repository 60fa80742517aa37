// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::Path;
use tracing::{error, info};

/// 从文本文件读取域名列表
///
/// 每行一个域名，空行忽略。文件无法读取时记录错误并返回空列表。
pub async fn load_domains(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let domains = parse_domains(&content);
            info!("Loaded {} domains from {}", domains.len(), path.display());
            domains
        }
        Err(e) => {
            error!("Error reading domains from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn parse_domains(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
