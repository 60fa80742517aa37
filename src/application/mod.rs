// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含批量爬取等面向调用方的用例，负责编排领域服务
pub mod use_cases;
