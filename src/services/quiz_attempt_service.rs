use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    sync::Arc,
};

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    cache::{CacheKey, ResultCache},
    deadline::Deadline,
    errors::{AppError, AppResult},
    models::{
        domain::{CachedScore, Quiz, ScoreResult},
        dto::{request::AttemptSubmission, response::QuizForSolve},
    },
    repositories::{QuizRepository, ScoreResultRepository},
    services::{cooldown::CooldownGuard, scoring::ScoringEngine},
};

const ATTEMPT_LOCK_STRIPES: usize = 64;

/// Striped per-(user, quiz) locks. Serializes the cooldown check and the
/// writes for concurrent submissions handled by this process; other
/// processes are not covered.
struct AttemptLocks {
    stripes: Vec<Mutex<()>>,
}

impl AttemptLocks {
    fn new(count: usize) -> Self {
        Self {
            stripes: (0..count.max(1)).map(|_| Mutex::new(())).collect(),
        }
    }

    async fn acquire(&self, user_id: i64, quiz_id: i64) -> MutexGuard<'_, ()> {
        let mut hasher = DefaultHasher::new();
        (user_id, quiz_id).hash(&mut hasher);
        let stripe = (hasher.finish() % self.stripes.len() as u64) as usize;
        self.stripes[stripe].lock().await
    }
}

pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    results: Arc<dyn ScoreResultRepository>,
    cache: Arc<dyn ResultCache>,
    cooldown: CooldownGuard,
    locks: AttemptLocks,
}

impl QuizAttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn ScoreResultRepository>,
        cache: Arc<dyn ResultCache>,
    ) -> Self {
        Self {
            cooldown: CooldownGuard::new(results.clone()),
            quizzes,
            results,
            cache,
            locks: AttemptLocks::new(ATTEMPT_LOCK_STRIPES),
        }
    }

    pub async fn get_quiz_for_solve(
        &self,
        company_id: i64,
        quiz_id: i64,
        deadline: Deadline,
    ) -> AppResult<QuizForSolve> {
        let quiz = self.load_quiz(company_id, quiz_id, deadline).await?;
        Ok(quiz.into())
    }

    /// Scores and records one attempt.
    ///
    /// The durable write happens first and is fatal on failure; the cache
    /// write follows and a failure there is only logged. A rejected attempt
    /// writes nothing.
    pub async fn submit_attempt(
        &self,
        user_id: i64,
        company_id: i64,
        submission: AttemptSubmission,
        deadline: Deadline,
    ) -> AppResult<ScoreResult> {
        let quiz = self
            .load_quiz(company_id, submission.quiz_id, deadline)
            .await?;

        let _guard = self.locks.acquire(user_id, quiz.id).await;

        let now = Utc::now();
        self.cooldown.check(user_id, &quiz, now, deadline).await?;

        let score = ScoringEngine::score(&quiz, &submission)?;
        let result = ScoreResult::new(
            user_id,
            quiz.id,
            company_id,
            score.score,
            score.total_correct_answers,
            score.total_questions_answered,
            now,
        );

        let result = deadline
            .store("score result insert", self.results.insert(result))
            .await?;

        let key = CacheKey::new(result.user_id, result.quiz_id, result.company_id);
        let cached = CachedScore::from(&result);
        if let Err(e) = deadline
            .cache("score result cache write", self.cache.put(&key, &cached))
            .await
        {
            log::warn!("Result {} stored but not cached under {}: {}", result.id, key, e);
        }

        log::info!(
            "User {} scored {} on quiz {} ({}/{})",
            user_id,
            result.score,
            result.quiz_id,
            result.total_correct_answers,
            result.total_questions_answered
        );
        Ok(result)
    }

    async fn load_quiz(&self, company_id: i64, quiz_id: i64, deadline: Deadline) -> AppResult<Quiz> {
        let quiz = deadline
            .store("quiz lookup", self.quizzes.find_by_id(quiz_id))
            .await?
            .ok_or_else(|| AppError::QuizNotFound(format!("quiz {}", quiz_id)))?;

        if quiz.company_id != company_id {
            return Err(AppError::QuizNotFound(format!(
                "quiz {} in company {}",
                quiz_id, company_id
            )));
        }
        Ok(quiz)
    }
}
