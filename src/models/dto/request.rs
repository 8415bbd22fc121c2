use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MAX_ANSWERS_PER_ATTEMPT: u64 = 500;

/// One chosen option for one question.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AnswerInput {
    #[validate(range(min = 1))]
    pub question_id: i64,

    #[validate(range(min = 1))]
    pub option_id: i64,
}

/// Answers submitted for a single attempt. Order is irrelevant to scoring.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AttemptSubmission {
    #[validate(range(min = 1))]
    pub quiz_id: i64,

    #[validate(length(max = 500), nested)]
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

impl AttemptSubmission {
    pub fn new(quiz_id: i64, answers: &[(i64, i64)]) -> Self {
        Self {
            quiz_id,
            answers: answers
                .iter()
                .map(|&(question_id, option_id)| AnswerInput {
                    question_id,
                    option_id,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_with_valid_ids_passes_validation() {
        let submission = AttemptSubmission::new(1, &[(10, 100), (11, 110)]);
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn submission_rejects_non_positive_ids() {
        let submission = AttemptSubmission::new(0, &[(10, 100)]);
        assert!(submission.validate().is_err());

        let submission = AttemptSubmission::new(1, &[(-1, 100)]);
        assert!(submission.validate().is_err());
    }

    #[test]
    fn submission_rejects_too_many_answers() {
        let answers: Vec<(i64, i64)> = (1..=(MAX_ANSWERS_PER_ATTEMPT as i64 + 1))
            .map(|i| (i, i))
            .collect();
        let submission = AttemptSubmission::new(1, &answers);
        assert!(submission.validate().is_err());
    }

    #[test]
    fn missing_answers_field_deserializes_as_empty() {
        let submission: AttemptSubmission =
            serde_json::from_str(r#"{"quiz_id": 3}"#).expect("should deserialize");
        assert!(submission.answers.is_empty());
    }
}
