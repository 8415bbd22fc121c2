//! Result cache: a TTL-bounded, read-first copy of recently computed scores.
//!
//! Keys are `{user_id}:{quiz_id}:{company_id}`. Aggregates scoped to one
//! dimension are answered by a wildcard scan over the other two segments, so
//! no secondary index has to be maintained.

mod key;
mod redis_cache;

pub use key::{CacheKey, Dimension};
pub use redis_cache::RedisResultCache;

use async_trait::async_trait;

use crate::{errors::AppResult, models::domain::CachedScore};

/// Operations the aggregation and attempt paths need from the cache tier.
///
/// Every failure is reported as `AppError::CacheUnavailable`; callers decide
/// whether that is fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Writes `value` under `key` with the configured TTL. Last writer wins.
    async fn put(&self, key: &CacheKey, value: &CachedScore) -> AppResult<()>;

    async fn get_exact(&self, key: &CacheKey) -> AppResult<Option<CachedScore>>;

    /// All live entries whose `dimension` segment equals `value`.
    async fn scan_by(&self, dimension: Dimension, value: i64) -> AppResult<Vec<CachedScore>>;

    async fn delete(&self, key: &CacheKey) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}
