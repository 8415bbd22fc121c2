use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::ScoreResult};

/// Durable, append-only record of every accepted attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreResultRepository: Send + Sync {
    async fn insert(&self, result: ScoreResult) -> AppResult<ScoreResult>;
    async fn find_by_quiz(&self, quiz_id: i64) -> AppResult<Vec<ScoreResult>>;
    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<ScoreResult>>;
    async fn find_by_company(&self, company_id: i64) -> AppResult<Vec<ScoreResult>>;
    async fn find_by_company_and_user(
        &self,
        company_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<ScoreResult>>;
    async fn find_by_company_and_quiz(
        &self,
        company_id: i64,
        quiz_id: i64,
    ) -> AppResult<Vec<ScoreResult>>;
    /// The result with the greatest `solved_at` for this user and quiz.
    async fn find_latest_for_user_and_quiz(
        &self,
        user_id: i64,
        quiz_id: i64,
    ) -> AppResult<Option<ScoreResult>>;
    async fn ping(&self) -> AppResult<()>;
}

pub struct MongoScoreResultRepository {
    collection: Collection<ScoreResult>,
}

impl MongoScoreResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("score_results");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for score_results collection");

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_quiz".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        let company_user_index = IndexModel::builder()
            .keys(doc! { "company_id": 1, "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("company_user".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_quiz_index).await?;
        self.collection.create_index(quiz_index).await?;
        self.collection.create_index(company_user_index).await?;

        log::info!("Successfully created indexes for score_results collection");
        Ok(())
    }

    async fn find_where(&self, filter: Document) -> AppResult<Vec<ScoreResult>> {
        let results = self.collection.find(filter).await?.try_collect().await?;
        Ok(results)
    }
}

#[async_trait]
impl ScoreResultRepository for MongoScoreResultRepository {
    async fn insert(&self, result: ScoreResult) -> AppResult<ScoreResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_by_quiz(&self, quiz_id: i64) -> AppResult<Vec<ScoreResult>> {
        self.find_where(doc! { "quiz_id": quiz_id }).await
    }

    async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<ScoreResult>> {
        self.find_where(doc! { "user_id": user_id }).await
    }

    async fn find_by_company(&self, company_id: i64) -> AppResult<Vec<ScoreResult>> {
        self.find_where(doc! { "company_id": company_id }).await
    }

    async fn find_by_company_and_user(
        &self,
        company_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<ScoreResult>> {
        self.find_where(doc! { "company_id": company_id, "user_id": user_id })
            .await
    }

    async fn find_by_company_and_quiz(
        &self,
        company_id: i64,
        quiz_id: i64,
    ) -> AppResult<Vec<ScoreResult>> {
        self.find_where(doc! { "company_id": company_id, "quiz_id": quiz_id })
            .await
    }

    async fn find_latest_for_user_and_quiz(
        &self,
        user_id: i64,
        quiz_id: i64,
    ) -> AppResult<Option<ScoreResult>> {
        // solved_at is persisted as an RFC 3339 string, which does not sort
        // reliably as text, so the maximum is taken after decoding.
        let results = self
            .find_where(doc! { "user_id": user_id, "quiz_id": quiz_id })
            .await?;
        Ok(results.into_iter().max_by_key(|r| r.solved_at))
    }

    async fn ping(&self) -> AppResult<()> {
        self.collection.estimated_document_count().await?;
        Ok(())
    }
}
