use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

use crate::{
    cache::{CacheKey, Dimension, ResultCache},
    errors::{AppError, AppResult},
    models::domain::CachedScore,
};

const SCAN_BATCH: usize = 100;

/// Result cache backed by Redis string keys with `EX` expiry.
#[derive(Clone)]
pub struct RedisResultCache {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisResultCache {
    pub async fn connect(redis_url: &str, ttl: Duration) -> AppResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        log::info!("Connected to Redis result cache (ttl {}s)", ttl.as_secs());

        Ok(Self {
            conn,
            ttl_secs: ttl.as_secs(),
        })
    }

    async fn scan_keys(&self, pattern: &str) -> AppResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may return a key more than once while the keyspace rehashes
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }
}

fn decode(key: &str, raw: &str) -> Option<CachedScore> {
    match serde_json::from_str(raw) {
        Ok(score) => Some(score),
        Err(e) => {
            log::warn!("Skipping undecodable cache entry '{}': {}", key, e);
            None
        }
    }
}

#[async_trait]
impl ResultCache for RedisResultCache {
    async fn put(&self, key: &CacheKey, value: &CachedScore) -> AppResult<()> {
        let payload = serde_json::to_string(value)
            .map_err(|e| AppError::InternalError(format!("cache encode failed: {}", e)))?;
        let mut conn = self.conn.clone();

        let (): () = redis::cmd("SET")
            .arg(key.to_string())
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn get_exact(&self, key: &CacheKey) -> AppResult<Option<CachedScore>> {
        let key = key.to_string();
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn.get(&key).await?;
        Ok(raw.and_then(|raw| decode(&key, &raw)))
    }

    async fn scan_by(&self, dimension: Dimension, value: i64) -> AppResult<Vec<CachedScore>> {
        let keys = self.scan_keys(&CacheKey::pattern(dimension, value)).await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut conn)
            .await?;

        // A `None` is a key that expired between SCAN and MGET
        let entries = keys
            .iter()
            .zip(values)
            .filter_map(|(key, raw)| raw.and_then(|raw| decode(key, &raw)))
            .collect();
        Ok(entries)
    }

    async fn delete(&self, key: &CacheKey) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _removed: i64 = conn.del(key.to_string()).await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
