//! Quiz questions and per-question answer slots.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of options every question offers.
pub const OPTION_COUNT: usize = 4;

/// Number of questions in a quiz.
pub const QUESTION_COUNT: usize = 5;

/// A multiple-choice question. Immutable once received from the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The prompt shown to the player.
    pub question: String,
    /// Exactly four answer options.
    pub options: [String; OPTION_COUNT],
    /// Index of the correct option (0-3).
    pub correct_answer: u8,
    /// Why the correct option is correct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Create a question without an explanation.
    pub fn new(
        question: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_answer: u8,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.map(str::to_string),
            correct_answer,
            explanation: None,
        }
    }

    /// Attach an explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[usize::from(self.correct_answer) % OPTION_COUNT]
    }

    /// Text of the option at `index`, if any.
    pub fn option(&self, index: u8) -> Option<&str> {
        self.options.get(usize::from(index)).map(String::as_str)
    }

    /// Whether `slot` holds the correct option.
    pub fn is_correct(&self, slot: AnswerSlot) -> bool {
        slot == AnswerSlot::Chosen(self.correct_answer)
    }
}

/// The player's answer to one question.
///
/// Serialized as `-1` when unanswered and as the option index otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Chosen(u8),
}

impl AnswerSlot {
    /// The chosen option index, if answered.
    pub fn chosen(self) -> Option<u8> {
        match self {
            AnswerSlot::Unanswered => None,
            AnswerSlot::Chosen(index) => Some(index),
        }
    }

    pub fn is_answered(self) -> bool {
        matches!(self, AnswerSlot::Chosen(_))
    }

    fn as_i8(self) -> i8 {
        match self {
            AnswerSlot::Unanswered => -1,
            // Option indices are validated below OPTION_COUNT.
            AnswerSlot::Chosen(index) => index as i8,
        }
    }
}

impl Serialize for AnswerSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

impl<'de> Deserialize<'de> for AnswerSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        match raw {
            -1 => Ok(AnswerSlot::Unanswered),
            0..=3 => Ok(AnswerSlot::Chosen(raw as u8)),
            other => Err(serde::de::Error::custom(format!(
                "answer slot must be -1 or 0-3, got {other}"
            ))),
        }
    }
}
