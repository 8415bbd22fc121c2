use std::sync::Arc;

use crate::{
    cache::{RedisResultCache, ResultCache},
    config::Config,
    db::Database,
    deadline::Deadline,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoScoreResultRepository, QuizRepository, ScoreResultRepository,
    },
    services::{AggregationEngine, QuizAttemptService, ResultsService},
};

#[derive(Clone)]
pub struct AppState {
    pub attempt_service: Arc<QuizAttemptService>,
    pub aggregation: Arc<AggregationEngine>,
    pub results_service: Arc<ResultsService>,
    pub result_store: Arc<dyn ScoreResultRepository>,
    pub result_cache: Arc<dyn ResultCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoScoreResultRepository::new(&db));
        result_repository.ensure_indexes().await?;

        let cache =
            Arc::new(RedisResultCache::connect(&config.redis_url, config.result_cache_ttl()).await?);

        Ok(Self::from_parts(
            quiz_repository,
            result_repository,
            cache,
            config,
        ))
    }

    /// Wires the services over already-constructed collaborators.
    pub fn from_parts(
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn ScoreResultRepository>,
        cache: Arc<dyn ResultCache>,
        config: Config,
    ) -> Self {
        let attempt_service = Arc::new(QuizAttemptService::new(
            quizzes,
            results.clone(),
            cache.clone(),
        ));
        let aggregation = Arc::new(AggregationEngine::new(cache.clone(), results.clone()));
        let results_service = Arc::new(ResultsService::new(results.clone()));

        Self {
            attempt_service,
            aggregation,
            results_service,
            result_store: results,
            result_cache: cache,
            config: Arc::new(config),
        }
    }

    /// A fresh end-to-end budget for one request.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.config.request_timeout())
    }
}
