use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::model::TimelinePage;
use crate::common::Pagination;

const TIMELINE_CACHE_PREFIX: &str = "timeline:";
// 整页可信度高，过期时间更长
const FULL_PAGE_TTL: Duration = Duration::from_secs(30 * 60);
const PARTIAL_PAGE_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// 外部键值缓存，只处理字节
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}

pub struct RedisCache {
    redis: Arc<RedisClient>,
}

impl RedisCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key, value, ttl.as_secs().max(1)).await?;
        Ok(())
    }
}

/// 未配置 Redis 时使用：读取永远未命中，写入直接丢弃
pub struct DisabledCache;

#[async_trait]
impl KeyValueCache for DisabledCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

pub fn timeline_key(subject_id: i64, page: Pagination) -> String {
    format!(
        "{}{}:{}:{}",
        TIMELINE_CACHE_PREFIX, subject_id, page.limit, page.offset
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub full: Duration,
    pub partial: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            full: FULL_PAGE_TTL,
            partial: PARTIAL_PAGE_TTL,
        }
    }
}

impl TtlPolicy {
    pub fn ttl_for<T>(&self, page: &TimelinePage<T>) -> Duration {
        match page {
            TimelinePage::Full(_) => self.full,
            TimelinePage::Partial(_) => self.partial,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum CacheLookup<T> {
    /// 缓存的是整页，可以直接返回
    Fresh(Vec<T>),
    /// 缓存的是不满一页的结果，需要回源重查
    Stale,
    Miss,
}

/// 分页缓存策略
///
/// 所有缓存错误都降级为未命中并记录日志，不会传给调用方。
#[derive(Clone)]
pub struct PageCache {
    backend: Arc<dyn KeyValueCache>,
    ttl: TtlPolicy,
}

impl PageCache {
    pub fn new(backend: Arc<dyn KeyValueCache>, ttl: TtlPolicy) -> Self {
        Self { backend, ttl }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledCache), TtlPolicy::default())
    }

    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> CacheLookup<T> {
        let bytes = match self.backend.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!("Page cache miss: {}", key);
                return CacheLookup::Miss;
            }
            Err(e) => {
                tracing::warn!("Failed to read page cache {}: {}", key, e);
                return CacheLookup::Miss;
            }
        };

        match serde_json::from_slice::<TimelinePage<T>>(&bytes) {
            Ok(TimelinePage::Full(items)) => {
                tracing::debug!("Get page from cache: {}", key);
                CacheLookup::Fresh(items)
            }
            Ok(TimelinePage::Partial(_)) => {
                tracing::debug!("Cached page may be outdated, re-querying store: {}", key);
                CacheLookup::Stale
            }
            Err(e) => {
                tracing::warn!("Failed to decode cached page {}: {}", key, e);
                CacheLookup::Miss
            }
        }
    }

    /// 写入一页结果，返回是否真正写入了缓存。空页不缓存。
    pub async fn store<T: Serialize + Sync>(&self, key: &str, page: &TimelinePage<T>) -> bool {
        if page.is_empty() {
            return false;
        }

        let ttl = self.ttl.ttl_for(page);
        let bytes = match serde_json::to_vec(page) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to serialize page for cache {}: {}", key, e);
                return false;
            }
        };

        match self.backend.set(key, bytes, ttl).await {
            Ok(()) => {
                tracing::debug!("Set page to cache: {} (ttl {}s)", key, ttl.as_secs());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to write page cache {}: {}", key, e);
                false
            }
        }
    }
}
