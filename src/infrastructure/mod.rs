// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供文件层面的外部集成：模式存储、域名列表读取和结果输出
pub mod domain_list;
pub mod pattern_store;
pub mod result_writer;
