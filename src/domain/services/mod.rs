// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 爬取服务（crawl_service）：单个域名的模式查找、发现与提取编排
/// - 发现服务（discovery_service）：从首页样本推导商品URL模式
/// - 提取服务（extraction_service）：链接收集与按模式过滤
pub mod crawl_service;
pub mod discovery_service;
pub mod extraction_service;
