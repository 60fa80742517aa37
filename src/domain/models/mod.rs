// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 模式（pattern）：域名到URL模式的映射及合并规则
/// - 爬取（crawl）：单个域名的爬取结果
pub mod crawl;
pub mod pattern;
