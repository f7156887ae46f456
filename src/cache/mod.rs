use anyhow::Result;
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

use crate::config::CacheConfig;

/// 缓存管理器
pub struct CacheManager {
    config: CacheConfig,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    /// Unix seconds at write time
    pub timestamp: i64,
    /// prompt的MD5哈希值
    pub prompt_hash: String,
    pub model_name: Option<String>,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// 生成prompt的MD5哈希
    pub fn hash_prompt(&self, prompt: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 获取缓存文件路径
    fn get_cache_path(&self, category: &str, hash: &str) -> PathBuf {
        self.config
            .cache_dir
            .join(category)
            .join(format!("{}.json", hash))
    }

    /// 检查缓存是否过期
    fn is_expired(&self, timestamp: i64) -> bool {
        let age_seconds = chrono::Utc::now().timestamp().saturating_sub(timestamp);
        let max_age_seconds =
            i64::try_from(self.config.expire_hours.saturating_mul(3600)).unwrap_or(i64::MAX);
        age_seconds > max_age_seconds
    }

    /// 获取缓存; unreadable or expired entries count as misses
    pub async fn get<T>(&self, category: &str, prompt: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !self.is_enabled() {
            return Ok(None);
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        if !cache_path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(&cache_path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("⚠️ Failed to read cache entry {:?}: {}", cache_path, e);
                return Ok(None);
            }
        };

        match serde_json::from_str::<CacheEntry<T>>(&content) {
            Ok(entry) if self.is_expired(entry.timestamp) => {
                // 删除过期缓存
                let _ = fs::remove_file(&cache_path).await;
                Ok(None)
            }
            Ok(entry) => {
                debug!("💾 Cache hit [{}] {}", category, hash);
                Ok(Some(entry.data))
            }
            Err(e) => {
                warn!("⚠️ Failed to decode cache entry {:?}: {}", cache_path, e);
                Ok(None)
            }
        }
    }

    /// 设置缓存
    pub async fn set<T>(
        &self,
        category: &str,
        prompt: &str,
        data: T,
        model_name: Option<&str>,
    ) -> Result<()>
    where
        T: Serialize,
    {
        if !self.is_enabled() {
            return Ok(());
        }

        let hash = self.hash_prompt(prompt);
        let cache_path = self.get_cache_path(category, &hash);

        // 确保目录存在
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let entry = CacheEntry {
            data,
            timestamp: chrono::Utc::now().timestamp(),
            prompt_hash: hash,
            model_name: model_name.map(str::to_string),
        };

        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(&cache_path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp_dir: &TempDir, enabled: bool) -> CacheManager {
        CacheManager::new(CacheConfig {
            enabled,
            cache_dir: temp_dir.path().join("cache"),
            expire_hours: 1,
        })
    }

    #[test]
    fn test_hash_prompt_is_stable() {
        let temp_dir = TempDir::new().unwrap();
        let cache = manager(&temp_dir, true);

        assert_eq!(cache.hash_prompt("hello"), cache.hash_prompt("hello"));
        assert_ne!(cache.hash_prompt("hello"), cache.hash_prompt("world"));
        assert_eq!(cache.hash_prompt("hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let cache = manager(&temp_dir, true);

        cache
            .set("completion", "prompt", "answer".to_string(), Some("model"))
            .await
            .unwrap();
        let hit: Option<String> = cache.get("completion", "prompt").await.unwrap();
        assert_eq!(hit.as_deref(), Some("answer"));

        let miss: Option<String> = cache.get("completion", "other").await.unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_categories_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let cache = manager(&temp_dir, true);

        cache
            .set("completion", "prompt", "answer".to_string(), None)
            .await
            .unwrap();
        let other: Option<String> = cache.get("structured", "prompt").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_disabled_cache_never_stores() {
        let temp_dir = TempDir::new().unwrap();
        let cache = manager(&temp_dir, false);

        cache
            .set("completion", "prompt", "answer".to_string(), None)
            .await
            .unwrap();
        let hit: Option<String> = cache.get("completion", "prompt").await.unwrap();
        assert!(hit.is_none());
        assert!(!temp_dir.path().join("cache").exists());
    }

    #[test]
    fn test_is_enabled_follows_config() {
        let temp_dir = TempDir::new().unwrap();
        assert!(manager(&temp_dir, true).is_enabled());
        assert!(!manager(&temp_dir, false).is_enabled());
    }

    #[test]
    fn test_huge_expiry_never_overflows() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::new(CacheConfig {
            enabled: true,
            cache_dir: temp_dir.path().join("cache"),
            expire_hours: u64::MAX,
        });

        assert!(!cache.is_expired(chrono::Utc::now().timestamp()));
        assert!(!cache.is_expired(i64::MIN));
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed() {
        let temp_dir = TempDir::new().unwrap();
        let cache = manager(&temp_dir, true);

        let hash = cache.hash_prompt("prompt");
        let path = cache.get_cache_path("completion", &hash);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let stale = CacheEntry {
            data: "old".to_string(),
            timestamp: chrono::Utc::now().timestamp() - 2 * 3600,
            prompt_hash: hash,
            model_name: None,
        };
        std::fs::write(&path, serde_json::to_string(&stale).unwrap()).unwrap();

        let hit: Option<String> = cache.get("completion", "prompt").await.unwrap();
        assert!(hit.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = manager(&temp_dir, true);

        let path = cache.get_cache_path("completion", &cache.hash_prompt("prompt"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let hit: Option<String> = cache.get("completion", "prompt").await.unwrap();
        assert!(hit.is_none());
    }
}
