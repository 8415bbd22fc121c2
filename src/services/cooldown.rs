use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::{
    deadline::Deadline,
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::ScoreResultRepository,
};

/// Decides whether a user may attempt a quiz again, based on their most
/// recent durable result for it.
pub struct CooldownGuard {
    results: Arc<dyn ScoreResultRepository>,
}

impl CooldownGuard {
    pub fn new(results: Arc<dyn ScoreResultRepository>) -> Self {
        Self { results }
    }

    pub async fn check(
        &self,
        user_id: i64,
        quiz: &Quiz,
        now: DateTime<Utc>,
        deadline: Deadline,
    ) -> AppResult<()> {
        let latest = deadline
            .store(
                "latest result lookup",
                self.results.find_latest_for_user_and_quiz(user_id, quiz.id),
            )
            .await?;

        let Some(previous) = latest else {
            return Ok(());
        };

        match remaining_cooldown(previous.solved_at, quiz.frequency, now) {
            Some(remaining) => {
                log::debug!(
                    "User {} blocked from quiz {} for another {}s",
                    user_id,
                    quiz.id,
                    remaining.num_seconds()
                );
                Err(AppError::CooldownActive {
                    retry_after_secs: remaining.num_seconds().max(1),
                })
            }
            None => Ok(()),
        }
    }
}

/// Time left before a new attempt is allowed, or `None` if it already is.
///
/// Elapsed time is counted in whole days; a partial day never counts toward
/// the frequency.
pub fn remaining_cooldown(
    last_solved_at: DateTime<Utc>,
    frequency_days: i64,
    now: DateTime<Utc>,
) -> Option<Duration> {
    let elapsed = now - last_solved_at;
    if elapsed.num_days() >= frequency_days {
        return None;
    }
    Some(Duration::days(frequency_days) - elapsed)
}
