use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Which segment of the composite key an aggregate is scoped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    User,
    Quiz,
    Company,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::User => "user",
            Dimension::Quiz => "quiz",
            Dimension::Company => "company",
        };
        f.write_str(name)
    }
}

impl FromStr for Dimension {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" | "user_id" => Ok(Dimension::User),
            "quiz" | "quiz_id" => Ok(Dimension::Quiz),
            "company" | "company_id" => Ok(Dimension::Company),
            other => Err(AppError::ValidationError(format!(
                "unknown dimension '{}', expected user, quiz or company",
                other
            ))),
        }
    }
}

/// `{user_id}:{quiz_id}:{company_id}`. All three segments are always present
/// and always in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub user_id: i64,
    pub quiz_id: i64,
    pub company_id: i64,
}

impl CacheKey {
    pub fn new(user_id: i64, quiz_id: i64, company_id: i64) -> Self {
        Self {
            user_id,
            quiz_id,
            company_id,
        }
    }

    pub fn segment(&self, dimension: Dimension) -> i64 {
        match dimension {
            Dimension::User => self.user_id,
            Dimension::Quiz => self.quiz_id,
            Dimension::Company => self.company_id,
        }
    }

    /// Glob pattern matching every key whose `dimension` segment is `value`.
    pub fn pattern(dimension: Dimension, value: i64) -> String {
        match dimension {
            Dimension::User => format!("{}:*:*", value),
            Dimension::Quiz => format!("*:{}:*", value),
            Dimension::Company => format!("*:*:{}", value),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.user_id, self.quiz_id, self.company_id)
    }
}

impl FromStr for CacheKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InternalError(format!("malformed cache key '{}'", s));

        let mut parts = s.split(':');
        let mut next = || -> Result<i64, AppError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(invalid)
        };
        let key = CacheKey::new(next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(key)
    }
}
