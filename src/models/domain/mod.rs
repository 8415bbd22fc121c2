pub mod quiz;
pub mod score_result;
pub use quiz::{Question, Quiz, QuizOption};
pub use score_result::{CachedScore, ScoreResult};
