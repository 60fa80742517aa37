// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括抓取网关、代理服务和批量爬取配置
pub mod seed_patterns;
pub mod settings;
