use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable record of one accepted attempt. Never updated after creation.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScoreResult {
    pub id: String,
    pub user_id: i64,
    pub quiz_id: i64,
    pub company_id: i64,
    pub score: f64,
    pub total_correct_answers: i64,
    pub total_questions_answered: i64,
    pub solved_at: DateTime<Utc>,
}

impl ScoreResult {
    pub fn new(
        user_id: i64,
        quiz_id: i64,
        company_id: i64,
        score: f64,
        total_correct_answers: i64,
        total_questions_answered: i64,
        solved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            quiz_id,
            company_id,
            score,
            total_correct_answers,
            total_questions_answered,
            solved_at,
        }
    }
}

/// The value stored under a result cache key: exactly the fields needed to
/// aggregate.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CachedScore {
    pub user_id: i64,
    pub quiz_id: i64,
    pub company_id: i64,
    pub score: f64,
    pub total_correct_answers: i64,
    pub total_questions_answered: i64,
}

impl From<&ScoreResult> for CachedScore {
    fn from(result: &ScoreResult) -> Self {
        Self {
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            company_id: result.company_id,
            score: result.score,
            total_correct_answers: result.total_correct_answers,
            total_questions_answered: result.total_questions_answered,
        }
    }
}
