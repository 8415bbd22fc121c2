use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    #[error("Invalid quiz state: {0}")]
    InvalidQuizState(String),

    #[error("Cooldown active: retry in {retry_after_secs} seconds")]
    CooldownActive { retry_after_secs: i64 },

    #[error("No results found: {0}")]
    NoResultsFound(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::QuizNotFound(_) => "QUIZ_NOT_FOUND",
            AppError::InvalidQuizState(_) => "INVALID_QUIZ_STATE",
            AppError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            AppError::NoResultsFound(_) => "NO_RESULTS_FOUND",
            AppError::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::QuizNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NoResultsFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidQuizState(_) => StatusCode::BAD_REQUEST,
            AppError::CooldownActive { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::CacheUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let AppError::CooldownActive { retry_after_secs } = self {
            builder.insert_header(("Retry-After", retry_after_secs.to_string()));
        }
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        builder.json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::CacheUnavailable(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::QuizNotFound("1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NoResultsFound("quiz 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidQuizState("no questions".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CooldownActive { retry_after_secs: 60 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::StoreUnavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_and_no_results_are_distinct() {
        let missing = AppError::NoResultsFound("company 1".into());
        let down = AppError::StoreUnavailable("timeout".into());

        assert!(missing.status_code().is_client_error());
        assert!(down.status_code().is_server_error());
        assert_ne!(missing.error_code(), down.error_code());
    }

    #[test]
    fn test_cooldown_response_carries_retry_after() {
        let resp = AppError::CooldownActive {
            retry_after_secs: 3600,
        }
        .error_response();

        let header = resp
            .headers()
            .get("Retry-After")
            .and_then(|h| h.to_str().ok());
        assert_eq!(header, Some("3600"));
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::QuizNotFound("quiz 7".into());
        assert_eq!(err.to_string(), "Quiz not found: quiz 7");

        let err = AppError::CooldownActive { retry_after_secs: 5 };
        assert_eq!(err.to_string(), "Cooldown active: retry in 5 seconds");
    }
}
