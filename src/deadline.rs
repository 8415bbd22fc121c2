use std::{future::Future, time::Duration};

use tokio::time::{timeout_at, Instant};

use crate::errors::{AppError, AppResult};

/// End-to-end time budget shared by every cache and store call of one
/// operation.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Runs a cache call, turning an overrun into `CacheUnavailable`.
    pub async fn cache<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        timeout_at(self.at, fut).await.unwrap_or_else(|_| {
            Err(AppError::CacheUnavailable(format!(
                "{} exceeded the request deadline",
                operation
            )))
        })
    }

    /// Runs a store call, turning an overrun into `StoreUnavailable`.
    pub async fn store<T, F>(&self, operation: &str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        timeout_at(self.at, fut).await.unwrap_or_else(|_| {
            Err(AppError::StoreUnavailable(format!(
                "{} exceeded the request deadline",
                operation
            )))
        })
    }
}
