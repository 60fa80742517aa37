// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 域名首页地址
pub fn homepage_url(domain: &str) -> String {
    format!("https://{}", domain)
}

/// 是否为可抓取的http/https链接
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
