// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::pattern::PatternMap;

/// 已知站点的商品URL模式
const KNOWN_PATTERNS: &[(&str, &[&str])] = &[
    (
        "amazon.in",
        &[
            r"/dp/[A-Z0-9]+",           // /dp/B08L5WHFT9
            r"/gp/product/[A-Z0-9]+",   // /gp/product/B08L5WHFT9
            r"/dp/[A-Z0-9]+.*",         // with query string
            r"/gp/product/[A-Z0-9]+.*", // with query string
        ],
    ),
    ("flipkart.com", &[r"/p/itm[0-9a-zA-Z]+"]),
    ("myntra.com", &[r".*/[0-9]+/buy$"]),
    ("bewakoof.com", &[r"/p/.+$"]),
    ("tatacliq.com", &[r".*/p-[a-z0-9]+$"]),
    ("ajio.com", &[r".*/p/[0-9a-zA-Z_]+$"]),
];

/// 返回已知站点的模式表
pub fn known_patterns() -> PatternMap {
    KNOWN_PATTERNS
        .iter()
        .map(|(domain, patterns)| {
            (
                domain.to_string(),
                patterns.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect()
}
