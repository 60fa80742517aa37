// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：爬取结果与模式映射
/// - 仓库接口（repositories）：模式持久化抽象接口
/// - 服务（services）：发现、提取与爬取编排
pub mod models;
pub mod repositories;
pub mod services;
