// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::pattern::PatternMap;
use async_trait::async_trait;
use thiserror::Error;

/// 模式存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 存储内容无法解析
    #[error("Corrupt pattern store: {0}")]
    Corrupt(#[source] serde_json::Error),
    /// 序列化失败
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// 模式仓库特质
///
/// 以快照为单位读写：每次操作读取完整映射，变更后整体写回
#[async_trait]
pub trait PatternRepository: Send + Sync {
    /// 读取完整快照，尚无持久化数据时返回空映射
    async fn load(&self) -> Result<PatternMap, StoreError>;

    /// 整体覆盖写入快照
    async fn save(&self, patterns: &PatternMap) -> Result<(), StoreError>;

    /// 将新模式与域名已有模式按集合语义合并后写回
    ///
    /// 空模式列表不会写入，存储中不会出现没有模式的域名
    async fn merge(&self, domain: &str, new_patterns: &[String]) -> Result<(), StoreError>;

    /// 为尚无条目的域名写入模式，已有条目保持不变
    ///
    /// # 返回值
    ///
    /// 新写入的域名数量
    async fn seed(&self, patterns: &PatternMap) -> Result<usize, StoreError>;

    /// 读取单个域名的模式
    async fn patterns_for(&self, domain: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.load().await?.remove(domain).unwrap_or_default())
    }
}
