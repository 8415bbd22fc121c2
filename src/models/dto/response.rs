use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::Dimension;
use crate::models::domain::{Question, Quiz, QuizOption, ScoreResult};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResultResponse {
    pub user_id: i64,
    pub quiz_id: i64,
    pub company_id: i64,
    pub score: f64,
    pub total_correct_answers: i64,
    pub total_questions_answered: i64,
    pub solved_at: DateTime<Utc>,
}

impl From<ScoreResult> for ScoreResultResponse {
    fn from(result: ScoreResult) -> Self {
        ScoreResultResponse {
            user_id: result.user_id,
            quiz_id: result.quiz_id,
            company_id: result.company_id,
            score: result.score,
            total_correct_answers: result.total_correct_answers,
            total_questions_answered: result.total_questions_answered,
            solved_at: result.solved_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageScoreResponse {
    pub dimension: Dimension,
    pub value: i64,
    /// `None` when the matched results answered zero questions in total.
    pub average_score: Option<f64>,
}

/// Quiz as shown to someone about to solve it. Correct flags are withheld.
#[derive(Debug, Clone, Serialize)]
pub struct QuizForSolve {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub frequency: i64,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub text: String,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub id: i64,
    pub text: String,
}

impl From<Quiz> for QuizForSolve {
    fn from(quiz: Quiz) -> Self {
        QuizForSolve {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            frequency: quiz.frequency,
            questions: quiz.questions.into_iter().map(QuestionView::from).collect(),
        }
    }
}

impl From<Question> for QuestionView {
    fn from(question: Question) -> Self {
        QuestionView {
            id: question.id,
            text: question.text,
            options: question.options.into_iter().map(OptionView::from).collect(),
        }
    }
}

impl From<QuizOption> for OptionView {
    fn from(option: QuizOption) -> Self {
        OptionView {
            id: option.id,
            text: option.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_for_solve_hides_correct_flags() {
        let quiz = Quiz {
            id: 1,
            company_id: 2,
            title: "Title".to_string(),
            description: "Description".to_string(),
            frequency: 1,
            questions: vec![Question {
                id: 10,
                text: "Pick one".to_string(),
                options: vec![QuizOption {
                    id: 100,
                    text: "This one".to_string(),
                    is_correct: true,
                }],
            }],
        };

        let view: QuizForSolve = quiz.into();
        let json = serde_json::to_string(&view).expect("view should serialize");

        assert!(!json.contains("is_correct"));
        assert_eq!(view.questions[0].options[0].id, 100);
    }

    #[test]
    fn average_response_serializes_null_average() {
        let response = AverageScoreResponse {
            dimension: Dimension::Company,
            value: 4,
            average_score: None,
        };

        let value = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(value["dimension"], "company");
        assert!(value["average_score"].is_null());
    }
}
