pub mod quiz_repository;
pub mod score_result_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use score_result_repository::{MongoScoreResultRepository, ScoreResultRepository};

#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use score_result_repository::MockScoreResultRepository;
