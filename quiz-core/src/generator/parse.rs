//! Decoding and validation of generator replies.

use super::GenerationError;
use crate::feedback::FeedbackResult;
use crate::question::{Question, OPTION_COUNT, QUESTION_COUNT};
use serde::Deserialize;
use serde_json::Value;

/// Remove Markdown code fences the model sometimes wraps JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a raw model reply as JSON.
pub fn parse_json(text: &str) -> Result<Value, GenerationError> {
    serde_json::from_str(&strip_code_fences(text)).map_err(GenerationError::InvalidJson)
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: Value,
    #[serde(default)]
    explanation: Option<String>,
}

/// Validate a questions payload into exactly [`QUESTION_COUNT`] questions.
pub fn questions(value: Value) -> Result<Vec<Question>, GenerationError> {
    let raw: RawQuiz = serde_json::from_value(value).map_err(GenerationError::Schema)?;

    if raw.questions.len() != QUESTION_COUNT {
        return Err(GenerationError::WrongQuestionCount {
            expected: QUESTION_COUNT,
            actual: raw.questions.len(),
        });
    }

    raw.questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| validate_question(index, q))
        .collect()
}

fn validate_question(index: usize, raw: RawQuestion) -> Result<Question, GenerationError> {
    if raw.question.trim().is_empty() {
        return Err(GenerationError::EmptyQuestion { index });
    }

    let count = raw.options.len();
    let options: [String; OPTION_COUNT] = raw
        .options
        .try_into()
        .map_err(|_| GenerationError::WrongOptionCount { index, count })?;

    let correct_answer = match answer_index(&raw.correct_answer) {
        Some(answer @ 0..=3) => answer as u8,
        answer => return Err(GenerationError::InvalidCorrectAnswer { index, answer }),
    };

    Ok(Question {
        question: raw.question,
        options,
        correct_answer,
        explanation: raw.explanation.filter(|e| !e.trim().is_empty()),
    })
}

/// Read an answer index from any JSON number with no fractional part.
///
/// Models occasionally emit `2.0` for `2`. Strings, fractions and missing
/// values yield `None`.
fn answer_index(value: &Value) -> Option<i64> {
    let number = value.as_number()?;
    if let Some(answer) = number.as_i64() {
        return Some(answer);
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
        .map(|f| f as i64)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeedback {
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    score_message: String,
}

/// Validate a feedback payload.
pub fn feedback(value: Value) -> Result<FeedbackResult, GenerationError> {
    let raw: RawFeedback = serde_json::from_value(value).map_err(GenerationError::Schema)?;

    if raw.feedback.trim().is_empty() {
        return Err(GenerationError::IncompleteFeedback("feedback"));
    }
    if raw.score_message.trim().is_empty() {
        return Err(GenerationError::IncompleteFeedback("scoreMessage"));
    }

    Ok(FeedbackResult {
        feedback: raw.feedback,
        score_message: raw.score_message,
    })
}
