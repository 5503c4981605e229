//! Quiz evaluation
//!
//! Pure scoring of a submitted answer set against a stored answer key.
//! The key is the authoritative question list: keyed questions missing
//! from the submission count as incorrect, while submitted answers for
//! unknown question ids are ignored entirely. Persisting the outcome is
//! the caller's job.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::RepositoryError;

/// One submitted answer
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    pub selected_option_id: Uuid,
}

/// Answer key for a single question
#[derive(Debug, Clone, Deserialize)]
pub struct KeyedQuestion {
    pub id: Uuid,
    pub correct_option_id: Uuid,
}

/// Answer key parsed from a `question` lesson item's content payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerKey {
    #[serde(default)]
    pub questions: Vec<KeyedQuestion>,
}

impl AnswerKey {
    /// Parses the key out of a lesson item content payload.
    pub fn from_content(content: &JsonValue) -> Result<Self, RepositoryError> {
        serde_json::from_value(content.clone())
            .map_err(|e| RepositoryError::Validation(format!("malformed answer key: {e}")))
    }
}

/// Outcome for a single keyed question
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuestionResult {
    pub question_id: Uuid,
    pub is_correct: bool,
}

/// Aggregate quiz outcome
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QuizEvaluation {
    pub results: Vec<QuestionResult>,
    pub correct_count: usize,
    pub total_count: usize,
    /// `round(100 * correct / total)`; 0 for an empty key
    pub percentage: u32,
}

/// Scores a submission against the key. Every question in the key
/// produces one result, in key order.
pub fn evaluate(key: &AnswerKey, answers: &[SubmittedAnswer]) -> QuizEvaluation {
    let results: Vec<QuestionResult> = key
        .questions
        .iter()
        .map(|question| {
            let is_correct = answers
                .iter()
                .find(|a| a.question_id == question.id)
                .is_some_and(|a| a.selected_option_id == question.correct_option_id);
            QuestionResult {
                question_id: question.id,
                is_correct,
            }
        })
        .collect();

    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let total_count = key.questions.len();
    let percentage = if total_count == 0 {
        0
    } else {
        (100.0 * correct_count as f64 / total_count as f64).round() as u32
    };

    QuizEvaluation {
        results,
        correct_count,
        total_count,
        percentage,
    }
}
