use std::collections::HashSet;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Quiz, dto::request::AttemptSubmission},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub score: f64,
    pub total_correct_answers: i64,
    /// Number of questions in the quiz, answered or not.
    pub total_questions_answered: i64,
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores a submission against a quiz snapshot.
    ///
    /// Answers naming an unknown question or option are ignored. Only the
    /// first answer given for a question counts, so repeating a correct
    /// answer cannot push the score past 100.
    pub fn score(quiz: &Quiz, submission: &AttemptSubmission) -> AppResult<Score> {
        let total_questions = quiz.questions.len() as i64;
        if total_questions == 0 {
            return Err(AppError::InvalidQuizState(format!(
                "quiz {} has no questions",
                quiz.id
            )));
        }

        let mut answered = HashSet::new();
        let mut correct: i64 = 0;

        for answer in &submission.answers {
            let Some(question) = quiz.question(answer.question_id) else {
                continue;
            };
            if !answered.insert(question.id) {
                continue;
            }
            if question
                .option(answer.option_id)
                .map(|o| o.is_correct)
                .unwrap_or(false)
            {
                correct += 1;
            }
        }

        Ok(Score {
            score: percentage(correct, total_questions),
            total_correct_answers: correct,
            total_questions_answered: total_questions,
        })
    }
}

/// `100 * part / whole` rounded to two decimals. `whole` must be non-zero.
pub fn percentage(part: i64, whole: i64) -> f64 {
    let raw = 100.0 * part as f64 / whole as f64;
    (raw * 100.0).round() / 100.0
}
