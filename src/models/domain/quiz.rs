use serde::{Deserialize, Serialize};

/// Immutable snapshot of a quiz as loaded for an attempt.
///
/// Questions and their options are embedded so one read yields the whole
/// scoring surface.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    /// Days a user must wait before attempting this quiz again.
    pub frequency: i64,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<QuizOption>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizOption {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

impl Quiz {
    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

impl Question {
    pub fn option(&self, option_id: i64) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
