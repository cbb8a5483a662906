//! Score tiers and end-of-quiz feedback.

use serde::{Deserialize, Serialize};

/// Generated (or locally synthesized) feedback for a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    /// Narrative paragraph about the player's performance.
    pub feedback: String,
    /// Short evaluative headline.
    pub score_message: String,
}

impl FeedbackResult {
    pub fn new(score_message: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            score_message: score_message.into(),
        }
    }

    /// Deterministic feedback used when the generator cannot be reached.
    pub fn fallback(score: usize, total: usize, topic: &str) -> Self {
        let percentage = percentage(score, total);
        Self {
            feedback: format!(
                "You scored {score} out of {total} questions correctly ({percentage}%). \
                 Great effort on completing the {topic} quiz!"
            ),
            score_message: ScoreTier::from_percentage(percentage).headline().to_string(),
        }
    }
}

/// Percentage of correct answers, rounded half-up. A zero total is 0%.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score * 200 + total) / (2 * total)) as u32
}

/// Performance bucket used for headlines and results styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreTier {
    /// 80% and above.
    Excellent,
    /// 60% to 79%.
    Good,
    /// Below 60%.
    KeepLearning,
}

impl ScoreTier {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            _ => ScoreTier::KeepLearning,
        }
    }

    pub fn from_score(score: usize, total: usize) -> Self {
        Self::from_percentage(percentage(score, total))
    }

    pub fn headline(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent work!",
            ScoreTier::Good => "Good job!",
            ScoreTier::KeepLearning => "Keep learning!",
        }
    }
}
