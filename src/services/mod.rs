pub mod aggregation;
pub mod cooldown;
pub mod quiz_attempt_service;
pub mod results_service;
pub mod scoring;

pub use aggregation::AggregationEngine;
pub use quiz_attempt_service::QuizAttemptService;
pub use results_service::{ResultsService, CSV_HEADER};
pub use scoring::ScoringEngine;
