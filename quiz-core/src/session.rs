//! Quiz session state and the reducer that drives it.
//!
//! A [`Session`] is never mutated in place. Every change goes through
//! [`reduce`], which takes the current session and an [`Action`] and returns
//! the next session, leaving the previous one intact for comparison.
//!
//! # Example
//!
//! ```
//! use quiz_core::session::{reduce, Action, Screen, Session};
//!
//! let session = Session::default();
//! let next = reduce(&session, Action::SetScreen(Screen::Loading)).unwrap();
//!
//! assert_eq!(session.current_screen, Screen::TopicSelection);
//! assert_eq!(next.current_screen, Screen::Loading);
//! ```

use crate::feedback::{self, FeedbackResult, ScoreTier};
use crate::question::{AnswerSlot, Question, OPTION_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from rejected session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("question index {index} is out of range for {len} questions")]
    InvalidQuestionIndex { index: usize, len: usize },

    #[error("answer index {index} is out of range (expected 0-3)")]
    InvalidAnswerIndex { index: u8 },
}

/// The screen the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    TopicSelection,
    Loading,
    Quiz,
    Results,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::TopicSelection => "topic-selection",
            Screen::Loading => "loading",
            Screen::Quiz => "quiz",
            Screen::Results => "results",
        };
        f.write_str(name)
    }
}

/// What to render, with the error view taking priority over the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Error(&'a str),
    Screen(Screen),
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetTopic(String),
    SetLoading(bool),
    SetQuestions(Vec<Question>),
    SetError(Option<String>),
    SetScreen(Screen),
    AnswerQuestion { question_index: usize, option_index: u8 },
    NextQuestion,
    PreviousQuestion,
    SetFeedback(FeedbackResult),
    ResetQuiz,
}

/// All state of a single quiz run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub current_screen: Screen,
    pub selected_topic: String,
    pub questions: Vec<Question>,
    pub current_question_index: usize,
    /// Same length as `questions`.
    pub answers: Vec<AnswerSlot>,
    /// Only meaningful once `feedback` is set.
    pub score: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub feedback: Option<FeedbackResult>,
}

/// Apply `action` to `session`, returning the next session.
///
/// Only `AnswerQuestion` can be rejected; on rejection the caller keeps the
/// unchanged `session`.
pub fn reduce(session: &Session, action: Action) -> Result<Session, SessionError> {
    let mut next = session.clone();

    match action {
        Action::SetTopic(topic) => next.selected_topic = topic,
        Action::SetLoading(loading) => next.is_loading = loading,
        Action::SetQuestions(questions) => {
            next.answers = vec![AnswerSlot::Unanswered; questions.len()];
            next.questions = questions;
            next.current_question_index = 0;
            next.is_loading = false;
            next.error = None;
        }
        Action::SetError(error) => {
            next.error = error;
            next.is_loading = false;
        }
        Action::SetScreen(screen) => next.current_screen = screen,
        Action::AnswerQuestion {
            question_index,
            option_index,
        } => {
            if question_index >= next.questions.len() {
                return Err(SessionError::InvalidQuestionIndex {
                    index: question_index,
                    len: next.questions.len(),
                });
            }
            if usize::from(option_index) >= OPTION_COUNT {
                return Err(SessionError::InvalidAnswerIndex {
                    index: option_index,
                });
            }
            let len = next.answers.len();
            let slot = next
                .answers
                .get_mut(question_index)
                .ok_or(SessionError::InvalidQuestionIndex {
                    index: question_index,
                    len,
                })?;
            *slot = AnswerSlot::Chosen(option_index);
        }
        Action::NextQuestion => {
            let last = next.questions.len().saturating_sub(1);
            next.current_question_index = (next.current_question_index + 1).min(last);
        }
        Action::PreviousQuestion => {
            next.current_question_index = next.current_question_index.saturating_sub(1);
        }
        Action::SetFeedback(result) => {
            next.score = next.count_correct();
            next.feedback = Some(result);
            next.current_screen = Screen::Results;
            next.is_loading = false;
        }
        Action::ResetQuiz => next = Session::default(),
    }

    Ok(next)
}

/// Per-question outcome for the results review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    pub number: usize,
    pub question: &'a Question,
    pub chosen: AnswerSlot,
    pub is_correct: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the presentation layer should render right now.
    pub fn view(&self) -> View<'_> {
        match &self.error {
            Some(error) => View::Error(error),
            None => View::Screen(self.current_screen),
        }
    }

    /// Number of answers matching the correct option.
    ///
    /// Unlike `score`, this is always up to date.
    pub fn count_correct(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, slot)| question.is_correct(**slot))
            .count()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_answer(&self) -> AnswerSlot {
        self.answers
            .get(self.current_question_index)
            .copied()
            .unwrap_or_default()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    pub fn all_answered(&self) -> bool {
        self.answers.iter().all(|a| a.is_answered())
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_question_index == self.questions.len() - 1
    }

    /// Position through the quiz, counting the current question as reached.
    pub fn progress_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        feedback::percentage(self.current_question_index + 1, self.questions.len())
    }

    /// Final score as a rounded percentage.
    pub fn percentage(&self) -> u32 {
        feedback::percentage(self.score, self.questions.len())
    }

    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::from_percentage(self.percentage())
    }

    /// Question-by-question breakdown for the results screen.
    pub fn review(&self) -> impl Iterator<Item = QuestionReview<'_>> {
        self.questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(i, (question, &chosen))| QuestionReview {
                number: i + 1,
                question,
                chosen,
                is_correct: question.is_correct(chosen),
            })
    }
}
