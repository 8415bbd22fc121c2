use std::sync::Arc;

use crate::{
    deadline::Deadline,
    errors::AppResult,
    models::domain::ScoreResult,
    repositories::ScoreResultRepository,
};

pub const CSV_HEADER: &str =
    "user_id;quiz_id;company_id;score;total_correct_answers;total_questions_answered";

/// Read-only listings of durable results, oldest first.
pub struct ResultsService {
    results: Arc<dyn ScoreResultRepository>,
}

impl ResultsService {
    pub fn new(results: Arc<dyn ScoreResultRepository>) -> Self {
        Self { results }
    }

    pub async fn my_results(&self, user_id: i64, deadline: Deadline) -> AppResult<Vec<ScoreResult>> {
        let rows = deadline
            .store("user results", self.results.find_by_user(user_id))
            .await?;
        Ok(oldest_first(rows))
    }

    pub async fn company_user_results(
        &self,
        company_id: i64,
        user_id: i64,
        deadline: Deadline,
    ) -> AppResult<Vec<ScoreResult>> {
        let rows = deadline
            .store(
                "company user results",
                self.results.find_by_company_and_user(company_id, user_id),
            )
            .await?;
        Ok(oldest_first(rows))
    }

    pub async fn company_results(
        &self,
        company_id: i64,
        deadline: Deadline,
    ) -> AppResult<Vec<ScoreResult>> {
        let rows = deadline
            .store("company results", self.results.find_by_company(company_id))
            .await?;
        Ok(oldest_first(rows))
    }

    pub async fn company_quiz_results(
        &self,
        company_id: i64,
        quiz_id: i64,
        deadline: Deadline,
    ) -> AppResult<Vec<ScoreResult>> {
        let rows = deadline
            .store(
                "company quiz results",
                self.results.find_by_company_and_quiz(company_id, quiz_id),
            )
            .await?;
        Ok(oldest_first(rows))
    }

    pub async fn export_company_quiz_csv(
        &self,
        company_id: i64,
        quiz_id: i64,
        deadline: Deadline,
    ) -> AppResult<String> {
        let rows = self
            .company_quiz_results(company_id, quiz_id, deadline)
            .await?;
        Ok(results_to_csv(&rows))
    }
}

fn oldest_first(mut rows: Vec<ScoreResult>) -> Vec<ScoreResult> {
    rows.sort_by_key(|r| r.solved_at);
    rows
}

/// Semicolon-delimited export. Every column is numeric, so no quoting is
/// needed.
pub fn results_to_csv(results: &[ScoreResult]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + results.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in results {
        out.push_str(&format!(
            "{};{};{};{};{};{}\n",
            r.user_id,
            r.quiz_id,
            r.company_id,
            r.score,
            r.total_correct_answers,
            r.total_questions_answered
        ));
    }
    out
}
