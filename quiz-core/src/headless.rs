//! Headless quiz interface for programmatic use.
//!
//! [`QuizApp`] is the orchestration layer between a presentation layer and
//! the pure [`reduce`] function. It owns the [`Session`] and the generator,
//! turns user intents into action sequences, and awaits generation where a
//! transition needs content. It's designed for:
//! - Driving a quiz from a terminal or GUI front end
//! - Automated testing with scripted generators
//! - Script-driven quiz sessions
//!
//! # Example
//!
//! ```ignore
//! use quiz_core::{QuizApp, QuizGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = QuizApp::new(QuizGenerator::from_env()?);
//!
//!     app.select_topic("Science & Discovery").await;
//!     if let Some(error) = &app.session().error {
//!         eprintln!("{error}");
//!         return Ok(());
//!     }
//!
//!     for _ in 0..5 {
//!         app.answer(0)?;
//!         app.advance().await;
//!     }
//!
//!     println!("Score: {}/5", app.session().score);
//!     Ok(())
//! }
//! ```

use crate::generator::{QuizGenerator, TextGenerator};
use crate::question::QUESTION_COUNT;
use crate::session::{reduce, Action, Screen, Session, SessionError};
use crate::topics;
use thiserror::Error;

/// Message shown when questions could not be generated.
pub const QUESTION_FAILURE_MESSAGE: &str = "Failed to generate quiz questions. Please try again.";

/// Errors from orchestrator operations that are not plain transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("no quiz in progress (screen {screen}, {questions} questions)")]
    NoQuizInProgress { screen: Screen, questions: usize },

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Outcome of [`QuizApp::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current question is unanswered, so nothing happened.
    Blocked,
    /// Moved to the next question.
    Moved,
    /// The quiz was finished and feedback is on the results screen.
    Finished,
}

/// A quiz that can be controlled programmatically.
pub struct QuizApp<G> {
    session: Session,
    generator: QuizGenerator<G>,
    /// Actions applied since the last reset, in order.
    actions: Vec<Action>,
}

impl<G: TextGenerator> QuizApp<G> {
    pub fn new(generator: QuizGenerator<G>) -> Self {
        Self {
            session: Session::default(),
            generator,
            actions: Vec::new(),
        }
    }

    /// Apply an action emitted by the presentation layer.
    ///
    /// A rejected action leaves the session unchanged. `ResetQuiz` also
    /// starts a fresh action log.
    pub fn dispatch(&mut self, action: Action) -> Result<&Session, SessionError> {
        self.session = reduce(&self.session, action.clone())?;
        if action == Action::ResetQuiz {
            self.actions.clear();
        }
        self.actions.push(action);
        Ok(&self.session)
    }

    /// Dispatch an action that cannot be rejected.
    fn apply(&mut self, action: Action) {
        if let Err(error) = self.dispatch(action) {
            tracing::error!(%error, "internal action rejected");
        }
    }

    // ========================================================================
    // Topic selection
    // ========================================================================

    /// Choose a topic and generate its questions.
    ///
    /// The session passes through the loading screen before landing on the
    /// quiz, or back on topic selection with an error if generation failed.
    pub async fn select_topic(&mut self, topic: &str) {
        tracing::info!(topic, "topic selected");

        self.apply(Action::SetTopic(topic.to_string()));
        self.apply(Action::SetLoading(true));
        self.apply(Action::SetScreen(Screen::Loading));

        match self.generator.generate_questions(topic).await {
            Ok(questions) => {
                self.apply(Action::SetQuestions(questions));
                self.apply(Action::SetScreen(Screen::Quiz));
            }
            Err(error) => {
                tracing::error!(topic, %error, "failed to generate quiz");
                self.apply(Action::SetError(Some(QUESTION_FAILURE_MESSAGE.to_string())));
                self.apply(Action::SetScreen(Screen::TopicSelection));
            }
        }
    }

    /// Choose one of the built-in topics by id.
    pub async fn select_topic_by_id(&mut self, id: &str) -> Result<(), QuizError> {
        let topic = topics::find(id).ok_or_else(|| QuizError::UnknownTopic(id.to_string()))?;
        self.select_topic(topic.name).await;
        Ok(())
    }

    // ========================================================================
    // Answering
    // ========================================================================

    /// Answer the current question.
    pub fn answer(&mut self, option_index: u8) -> Result<(), SessionError> {
        let question_index = self.session.current_question_index;
        self.dispatch(Action::AnswerQuestion {
            question_index,
            option_index,
        })?;
        Ok(())
    }

    pub fn next_question(&mut self) {
        self.apply(Action::NextQuestion);
    }

    pub fn previous_question(&mut self) {
        self.apply(Action::PreviousQuestion);
    }

    /// The "Next" button: finish on a fully answered last question, otherwise
    /// move forward. Does nothing while the current question is unanswered.
    pub async fn advance(&mut self) -> Advance {
        if !self.session.current_answer().is_answered() {
            return Advance::Blocked;
        }
        if self.session.is_last_question() && self.session.all_answered() {
            match self.finish().await {
                Ok(()) => Advance::Finished,
                Err(_) => Advance::Blocked,
            }
        } else {
            self.next_question();
            Advance::Moved
        }
    }

    /// Score the quiz, generate feedback, and show the results.
    ///
    /// Only a quiz on screen with a full question set can be finished;
    /// otherwise nothing is dispatched and the generator is not called.
    pub async fn finish(&mut self) -> Result<(), QuizError> {
        let screen = self.session.current_screen;
        let questions = self.session.questions.len();
        if screen != Screen::Quiz || questions != QUESTION_COUNT {
            tracing::warn!(%screen, questions, "finish requested with no quiz in progress");
            return Err(QuizError::NoQuizInProgress { screen, questions });
        }

        self.apply(Action::SetLoading(true));

        let score = self.session.count_correct();
        let total = self.session.questions.len();
        let topic = self.session.selected_topic.clone();

        let feedback = self.generator.generate_feedback(score, total, &topic).await;
        tracing::info!(topic = %topic, score, total, "quiz finished");

        self.apply(Action::SetFeedback(feedback));
        Ok(())
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Dismiss the error and go back to topic selection.
    pub fn retry(&mut self) {
        self.apply(Action::SetError(None));
        self.apply(Action::SetScreen(Screen::TopicSelection));
    }

    /// Throw away the session and start over.
    pub fn reset(&mut self) {
        tracing::info!("quiz reset");
        self.apply(Action::ResetQuiz);
    }

    // ========================================================================
    // State Queries
    // ========================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every action applied since the last reset, oldest first.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn generator(&self) -> &QuizGenerator<G> {
        &self.generator
    }

    pub fn into_session(self) -> Session {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::AnswerSlot;
    use crate::session::View;
    use crate::testing::{
        assert_all_unanswered, assert_has_error, assert_no_error, assert_screen,
        sample_correct_answers, TestHarness,
    };

    #[tokio::test]
    async fn test_select_topic_success() {
        let mut harness = TestHarness::new();
        harness.expect_questions();

        harness.app.select_topic("Science").await;

        let session = harness.session();
        assert_screen(session, Screen::Quiz);
        assert_no_error(session);
        assert_eq!(session.selected_topic, "Science");
        assert_eq!(session.questions.len(), 5);
        assert_all_unanswered(session);
        assert!(!session.is_loading);
    }

    #[tokio::test]
    async fn test_loading_is_dispatched_before_questions() {
        let mut harness = TestHarness::new();
        harness.expect_questions();

        harness.app.select_topic("Science").await;

        let actions = harness.app.actions();
        assert_eq!(actions[0], Action::SetTopic("Science".to_string()));
        assert_eq!(actions[1], Action::SetLoading(true));
        assert_eq!(actions[2], Action::SetScreen(Screen::Loading));
        assert!(matches!(actions[3], Action::SetQuestions(_)));
        assert_eq!(actions[4], Action::SetScreen(Screen::Quiz));
        assert_eq!(actions.len(), 5);
    }

    #[tokio::test]
    async fn test_select_topic_failure() {
        let mut harness = TestHarness::new();
        harness.expect_failures(3);

        harness.app.select_topic("Science").await;

        let session = harness.session();
        assert_screen(session, Screen::TopicSelection);
        assert_eq!(session.error.as_deref(), Some(QUESTION_FAILURE_MESSAGE));
        assert_eq!(session.view(), View::Error(QUESTION_FAILURE_MESSAGE));
        assert!(session.questions.is_empty());
        assert!(!session.is_loading);
        assert_eq!(harness.generator.calls(), 3);

        let actions = harness.app.actions();
        assert_eq!(actions[1], Action::SetLoading(true));
        assert!(matches!(actions[3], Action::SetError(Some(_))));
    }

    #[tokio::test]
    async fn test_retry_then_succeed() {
        let mut harness = TestHarness::new();
        harness.expect_failures(3).expect_questions();

        harness.app.select_topic("Tech Trends").await;
        assert_has_error(harness.session());

        harness.app.retry();
        assert_no_error(harness.session());
        assert_screen(harness.session(), Screen::TopicSelection);

        harness.app.select_topic("Tech Trends").await;
        assert_screen(harness.session(), Screen::Quiz);
        assert_no_error(harness.session());
    }

    #[tokio::test]
    async fn test_select_topic_by_id() {
        let mut harness = TestHarness::new();
        harness.expect_questions();

        harness.app.select_topic_by_id("environment").await.unwrap();
        assert_eq!(harness.session().selected_topic, "Environment & Climate");
        assert!(harness.generator.prompts()[0].contains("about Environment & Climate"));

        let err = harness.app.select_topic_by_id("cooking").await.unwrap_err();
        assert_eq!(err, QuizError::UnknownTopic("cooking".to_string()));
    }

    #[tokio::test]
    async fn test_answer_rejects_bad_option() {
        let mut harness = TestHarness::new();
        harness.expect_questions();
        harness.app.select_topic("Science").await;

        let before = harness.session().clone();
        let err = harness.app.answer(7).unwrap_err();

        assert_eq!(err, SessionError::InvalidAnswerIndex { index: 7 });
        assert_eq!(harness.session(), &before);
    }

    #[tokio::test]
    async fn test_answer_before_questions_is_rejected() {
        let mut harness = TestHarness::new();
        let err = harness.app.answer(0).unwrap_err();
        assert_eq!(err, SessionError::InvalidQuestionIndex { index: 0, len: 0 });
        assert!(harness.app.actions().is_empty());
    }

    #[tokio::test]
    async fn test_advance_flow() {
        let mut harness = TestHarness::new();
        harness
            .expect_questions()
            .expect_feedback("Great!", "You know your science.");
        harness.app.select_topic("Science").await;

        assert_eq!(harness.app.advance().await, Advance::Blocked);

        let answers = sample_correct_answers();
        for (i, &option) in answers.iter().enumerate() {
            harness.app.answer(option).unwrap();
            let outcome = harness.app.advance().await;
            if i < answers.len() - 1 {
                assert_eq!(outcome, Advance::Moved);
            } else {
                assert_eq!(outcome, Advance::Finished);
            }
        }

        let session = harness.session();
        assert_screen(session, Screen::Results);
        assert_eq!(session.score, 5);
        assert_eq!(session.feedback.as_ref().unwrap().score_message, "Great!");
        assert!(!session.is_loading);
    }

    #[tokio::test]
    async fn test_advance_on_last_question_with_gaps_stays() {
        let mut harness = TestHarness::new();
        harness.expect_questions();
        harness.app.select_topic("Science").await;

        for _ in 0..4 {
            harness.app.next_question();
        }
        harness.app.answer(1).unwrap();

        assert_eq!(harness.app.advance().await, Advance::Moved);
        assert_screen(harness.session(), Screen::Quiz);
        assert_eq!(harness.session().current_question_index, 4);
    }

    #[tokio::test]
    async fn test_finish_uses_fallback_when_feedback_fails() {
        let mut harness = TestHarness::new();
        harness.expect_questions().expect_failures(3);
        harness.app.select_topic("Science & Discovery").await;

        let mut answers = sample_correct_answers();
        answers[0] = (answers[0] + 1) % 4;
        harness.answer_all(&answers);
        harness.app.finish().await.unwrap();

        let session = harness.session();
        assert_screen(session, Screen::Results);
        assert_no_error(session);
        assert_eq!(session.score, 4);
        let feedback = session.feedback.as_ref().unwrap();
        assert_eq!(feedback.score_message, "Excellent work!");
        assert!(feedback.feedback.contains("4 out of 5"));
        assert!(feedback.feedback.contains("Science & Discovery"));
    }

    #[tokio::test]
    async fn test_reset_returns_to_default() {
        let mut harness = TestHarness::new();
        harness.expect_questions().expect_feedback("Ok", "Ok");
        harness.app.select_topic("Science").await;
        harness.app.answer(2).unwrap();
        harness.app.finish().await.unwrap();

        harness.app.reset();

        assert_eq!(harness.session(), &Session::default());
        assert_eq!(harness.app.actions(), &[Action::ResetQuiz]);
    }

    #[tokio::test]
    async fn test_action_log_does_not_grow_across_resets() {
        let mut harness = TestHarness::new();
        for _ in 0..3 {
            harness.expect_questions();
            harness.app.select_topic("Science").await;
            harness.app.reset();
        }
        assert_eq!(harness.app.actions(), &[Action::ResetQuiz]);
    }

    #[tokio::test]
    async fn test_finish_without_quiz_is_rejected() {
        let mut harness = TestHarness::new();

        let err = harness.app.finish().await.unwrap_err();

        assert_eq!(
            err,
            QuizError::NoQuizInProgress { screen: Screen::TopicSelection, questions: 0 }
        );
        assert_eq!(harness.session(), &Session::default());
        assert!(harness.app.actions().is_empty());
        assert_eq!(harness.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_finish_twice_keeps_first_results() {
        let mut harness = TestHarness::new();
        harness.expect_questions().expect_feedback("Nice", "Nice run.");
        harness.app.select_topic("Science").await;
        harness.answer_all(&sample_correct_answers());
        harness.app.finish().await.unwrap();

        let err = harness.app.finish().await.unwrap_err();
        assert!(matches!(err, QuizError::NoQuizInProgress { screen: Screen::Results, .. }));
        assert_eq!(harness.generator.calls(), 2);
        assert_eq!(harness.app.advance().await, Advance::Blocked);
    }

    #[tokio::test]
    async fn test_navigation_keeps_answers() {
        let mut harness = TestHarness::new();
        harness.expect_questions();
        harness.app.select_topic("Science").await;

        harness.app.answer(3).unwrap();
        harness.app.next_question();
        harness.app.previous_question();
        harness.app.previous_question();

        let session = harness.session();
        assert_eq!(session.current_question_index, 0);
        assert_eq!(session.current_answer(), AnswerSlot::Chosen(3));
    }
}
