// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含批量爬取用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置、环境变量和内置种子模式
pub mod config;

/// 领域模块
///
/// 包含爬取结果模型、模式仓库接口以及发现/提取/爬取服务
pub mod domain;

/// 引擎模块
///
/// 实现静态HTTP、代理和无头浏览器抓取引擎，以及带回退的抓取网关
pub mod engines;

/// 基础设施模块
///
/// 提供模式文件存储、域名列表读取和结果输出
pub mod infrastructure;

/// 工具模块
///
/// 提供日志初始化和URL辅助函数
pub mod utils;
