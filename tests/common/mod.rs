#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::{sync::RwLock, time::Instant};

use quiz_results_server::{
    app_state::AppState,
    cache::{CacheKey, Dimension, ResultCache},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{CachedScore, Question, Quiz, QuizOption, ScoreResult},
    repositories::{QuizRepository, ScoreResultRepository},
};

pub const TEST_JWT_SECRET: &str = "integration_test_secret_that_is_long_enough";

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "quiz-results-test".to_string(),
        redis_url: "redis://localhost:6379".to_string(),
        result_cache_ttl_hours: 48,
        request_timeout_secs: 5,
        web_server_host: "localhost".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
        cors_allowed_origin: None,
    }
}

/// Cache double that keeps entries in a map, honours a TTL and matches keys
/// segment by segment the way a `*` glob over `{u}:{q}:{c}` would.
pub struct InMemoryResultCache {
    entries: RwLock<HashMap<String, (CachedScore, Instant)>>,
    ttl: Duration,
    failing: AtomicBool,
}

impl InMemoryResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|(_, expires_at)| *expires_at > now)
            .count()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::CacheUnavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ResultCache for InMemoryResultCache {
    async fn put(&self, key: &CacheKey, value: &CachedScore) -> AppResult<()> {
        self.check()?;
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), (value.clone(), Instant::now() + self.ttl));
        Ok(())
    }

    async fn get_exact(&self, key: &CacheKey) -> AppResult<Option<CachedScore>> {
        self.check()?;
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(&key.to_string())
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone()))
    }

    async fn scan_by(&self, dimension: Dimension, value: i64) -> AppResult<Vec<CachedScore>> {
        self.check()?;
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|(_, (_, expires_at))| *expires_at > now)
            .filter_map(|(raw, (score, _))| {
                let key: CacheKey = raw.parse().ok()?;
                (key.segment(dimension) == value).then(|| score.clone())
            })
            .collect())
    }

    async fn delete(&self, key: &CacheKey) -> AppResult<()> {
        self.check()?;
        self.entries.write().await.remove(&key.to_string());
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<i64, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(&id).cloned())
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }
}

pub struct InMemoryScoreResultRepository {
    results: RwLock<Vec<ScoreResult>>,
    failing: AtomicBool,
}

impl InMemoryScoreResultRepository {
    pub fn new() -> Self {
        Self {
            results: RwLock::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::StoreUnavailable("server selection timeout".to_string()))
        } else {
            Ok(())
        }
    }

    async fn filter<F>(&self, predicate: F) -> AppResult<Vec<ScoreResult>>
    where
        F: Fn(&ScoreResult) -> bool,
    {
        self.check()?;
        let results = self.results.read().await;
        Ok(results.iter().filter(|r| predicate(r)).cloned().collect())
    }
}

#[async_trait]
impl ScoreResultRepository for InMemoryScoreResultRepository {
    async fn insert(&self, result: ScoreResult) -> AppResult<ScoreResult> {
        self.check()?;
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_quiz(&self, quiz_id: i64) -> AppResult<Vec<ScoreResult>> {
        self.filter(|r| r.quiz_id == quiz_id).await
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<ScoreResult>> {
        self.filter(|r| r.user_id == user_id).await
    }

    async fn find_by_company(&self, company_id: i64) -> AppResult<Vec<ScoreResult>> {
        self.filter(|r| r.company_id == company_id).await
    }

    async fn find_by_company_and_user(
        &self,
        company_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<ScoreResult>> {
        self.filter(|r| r.company_id == company_id && r.user_id == user_id)
            .await
    }

    async fn find_by_company_and_quiz(
        &self,
        company_id: i64,
        quiz_id: i64,
    ) -> AppResult<Vec<ScoreResult>> {
        self.filter(|r| r.company_id == company_id && r.quiz_id == quiz_id)
            .await
    }

    async fn find_latest_for_user_and_quiz(
        &self,
        user_id: i64,
        quiz_id: i64,
    ) -> AppResult<Option<ScoreResult>> {
        let results = self
            .filter(|r| r.user_id == user_id && r.quiz_id == quiz_id)
            .await?;
        Ok(results.into_iter().max_by_key(|r| r.solved_at))
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

/// Four questions, two options each. The correct option of question `n` is
/// `n * 10 + 1`, the wrong one `n * 10 + 2`.
pub fn four_question_quiz(id: i64, company_id: i64, frequency: i64) -> Quiz {
    Quiz {
        id,
        company_id,
        title: format!("Quiz {}", id),
        description: "Integration test quiz".to_string(),
        frequency,
        questions: (1..=4)
            .map(|n| Question {
                id: n,
                text: format!("Question {}", n),
                options: vec![
                    QuizOption {
                        id: n * 10 + 1,
                        text: "right".to_string(),
                        is_correct: true,
                    },
                    QuizOption {
                        id: n * 10 + 2,
                        text: "wrong".to_string(),
                        is_correct: false,
                    },
                ],
            })
            .collect(),
    }
}

/// Three right answers and one wrong one for [`four_question_quiz`].
pub const THREE_OF_FOUR: [(i64, i64); 4] = [(1, 11), (2, 21), (3, 31), (4, 42)];

pub struct Harness {
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub results: Arc<InMemoryScoreResultRepository>,
    pub cache: Arc<InMemoryResultCache>,
    pub state: AppState,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_cache_ttl(Duration::from_secs(48 * 3600))
    }

    pub fn with_cache_ttl(ttl: Duration) -> Self {
        let quizzes = Arc::new(InMemoryQuizRepository::new());
        let results = Arc::new(InMemoryScoreResultRepository::new());
        let cache = Arc::new(InMemoryResultCache::new(ttl));
        let state = AppState::from_parts(
            quizzes.clone(),
            results.clone(),
            cache.clone(),
            test_config(),
        );

        Self {
            quizzes,
            results,
            cache,
            state,
        }
    }

    pub async fn with_quiz(self, quiz: Quiz) -> Self {
        self.quizzes
            .insert(quiz)
            .await
            .expect("in-memory insert should succeed");
        self
    }
}
