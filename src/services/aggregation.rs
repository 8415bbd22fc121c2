use std::sync::Arc;

use crate::{
    cache::{Dimension, ResultCache},
    deadline::Deadline,
    errors::{AppError, AppResult},
    models::domain::ScoreResult,
    repositories::ScoreResultRepository,
    services::scoring::percentage,
};

/// Answers "average score" queries from the cache tier, falling back to the
/// durable store when the cache holds nothing for the requested dimension.
pub struct AggregationEngine {
    cache: Arc<dyn ResultCache>,
    results: Arc<dyn ScoreResultRepository>,
}

impl AggregationEngine {
    pub fn new(cache: Arc<dyn ResultCache>, results: Arc<dyn ScoreResultRepository>) -> Self {
        Self { cache, results }
    }

    /// Returns `Ok(None)` when the matched results answered zero questions in
    /// total, and `NoResultsFound` when nothing matched in either tier.
    pub async fn average_score(
        &self,
        dimension: Dimension,
        value: i64,
        deadline: Deadline,
    ) -> AppResult<Option<f64>> {
        match deadline
            .cache("cache scan", self.cache.scan_by(dimension, value))
            .await
        {
            Ok(entries) if !entries.is_empty() => {
                log::debug!(
                    "Average for {} {} served from {} cached entries",
                    dimension,
                    value,
                    entries.len()
                );
                return Ok(combine(
                    entries
                        .iter()
                        .map(|e| (e.total_correct_answers, e.total_questions_answered)),
                ));
            }
            Ok(_) => {
                log::debug!("Cache miss for {} {}, reading store", dimension, value);
            }
            Err(e) => {
                log::warn!(
                    "Cache scan for {} {} failed, reading store: {}",
                    dimension,
                    value,
                    e
                );
            }
        }

        let rows = deadline
            .store("result scan", self.scan_store(dimension, value))
            .await?;
        if rows.is_empty() {
            return Err(AppError::NoResultsFound(format!(
                "no results for {} {}",
                dimension, value
            )));
        }

        Ok(combine(
            rows.iter()
                .map(|r| (r.total_correct_answers, r.total_questions_answered)),
        ))
    }

    async fn scan_store(&self, dimension: Dimension, value: i64) -> AppResult<Vec<ScoreResult>> {
        match dimension {
            Dimension::User => self.results.find_by_user(value).await,
            Dimension::Quiz => self.results.find_by_quiz(value).await,
            Dimension::Company => self.results.find_by_company(value).await,
        }
    }
}

/// Sums `(correct, total)` pairs and returns `100 * correct / total` to two
/// decimals, or `None` if no questions were answered overall.
pub fn combine<I>(totals: I) -> Option<f64>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let (correct, answered) = totals
        .into_iter()
        .fold((0i64, 0i64), |(c, t), (dc, dt)| (c + dc, t + dt));

    if answered == 0 {
        return None;
    }
    Some(percentage(correct, answered))
}
