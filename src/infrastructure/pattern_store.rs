// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::pattern::{merge_patterns, without_empty, PatternMap};
use crate::domain::repositories::pattern_repository::{PatternRepository, StoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// 基于JSON文件的模式存储
///
/// 文件内容为 `{ "domain": ["pattern", ...] }`，每次变更整体重写。
/// 写入先落到临时文件再重命名，写入中途失败不会破坏原文件。
/// 同一进程内的 merge/seed 通过互斥锁串行执行；跨进程仍为后写者胜出。
pub struct JsonPatternStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonPatternStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_snapshot(&self, patterns: &PatternMap) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(patterns).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&data).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::Io(e));
        }

        debug!(
            "Pattern store written to {} ({} domains)",
            self.path().display(),
            patterns.len()
        );
        Ok(())
    }
}

#[async_trait]
impl PatternRepository for JsonPatternStore {
    async fn load(&self) -> Result<PatternMap, StoreError> {
        match fs::read(&self.path).await {
            Ok(data) => serde_json::from_slice(&data).map_err(StoreError::Corrupt),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(PatternMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn save(&self, patterns: &PatternMap) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_snapshot(&without_empty(patterns)).await
    }

    async fn merge(&self, domain: &str, new_patterns: &[String]) -> Result<(), StoreError> {
        if new_patterns.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        // A store we cannot parse is left untouched rather than overwritten
        let mut patterns = self.load().await?;
        let existing = patterns.remove(domain).unwrap_or_default();
        let merged = merge_patterns(&existing, new_patterns);
        patterns.insert(domain.to_string(), merged);
        self.write_snapshot(&patterns).await?;

        info!(
            "URL patterns for {} saved to {}",
            domain,
            self.path().display()
        );
        Ok(())
    }

    async fn seed(&self, seed: &PatternMap) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut patterns = self.load().await?;
        let mut added = 0;

        for (domain, list) in seed {
            if list.is_empty() || patterns.contains_key(domain) {
                continue;
            }
            patterns.insert(domain.clone(), merge_patterns(&[], list));
            added += 1;
        }

        if added > 0 {
            self.write_snapshot(&patterns).await?;
        }
        Ok(added)
    }
}

/// 内存模式存储（用于测试和不需要持久化的运行）
#[derive(Default)]
pub struct InMemoryPatternStore {
    data: RwLock<PatternMap>,
}

impl InMemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(patterns: PatternMap) -> Self {
        Self {
            data: RwLock::new(patterns),
        }
    }
}

#[async_trait]
impl PatternRepository for InMemoryPatternStore {
    async fn load(&self) -> Result<PatternMap, StoreError> {
        Ok(self.data.read().await.clone())
    }

    async fn save(&self, patterns: &PatternMap) -> Result<(), StoreError> {
        *self.data.write().await = without_empty(patterns);
        Ok(())
    }

    async fn merge(&self, domain: &str, new_patterns: &[String]) -> Result<(), StoreError> {
        if new_patterns.is_empty() {
            return Ok(());
        }
        let mut data = self.data.write().await;
        let existing = data.remove(domain).unwrap_or_default();
        data.insert(domain.to_string(), merge_patterns(&existing, new_patterns));
        Ok(())
    }

    async fn seed(&self, seed: &PatternMap) -> Result<usize, StoreError> {
        let mut data = self.data.write().await;
        let mut added = 0;
        for (domain, list) in seed {
            if list.is_empty() || data.contains_key(domain) {
                continue;
            }
            data.insert(domain.clone(), merge_patterns(&[], list));
            added += 1;
        }
        Ok(added)
    }
}

#[cfg(test)]
#[path = "pattern_store_test.rs"]
mod tests;
