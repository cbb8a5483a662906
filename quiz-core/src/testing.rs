//! Testing utilities for the quiz engine.
//!
//! This module provides tools for integration testing:
//! - `MockGenerator` for deterministic testing without API calls
//! - `TestHarness` for scripted quiz scenarios
//! - Sample content and assertion helpers for verifying session state

use crate::generator::{GeneratorConfig, QuizGenerator, TextGenerator};
use crate::headless::QuizApp;
use crate::question::{AnswerSlot, Question};
use crate::session::{Screen, Session};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// A scripted reply from the mock generator.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    NetworkError(String),
    ApiError { status: u16, message: String },
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        MockReply::NetworkError(message.into())
    }

    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        MockReply::ApiError {
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    prompts: Vec<String>,
}

/// A text generator that replays scripted replies in order.
///
/// Clones share the same script, so a test can keep a handle after moving
/// one into a [`QuizGenerator`]. Once the script runs out every call fails
/// with a network error.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    state: Arc<Mutex<MockState>>,
}

impl MockGenerator {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                replies: replies.into(),
                prompts: Vec::new(),
            })),
        }
    }

    /// Add a reply to the end of the script.
    pub fn queue(&self, reply: MockReply) {
        self.lock().replies.push_back(reply);
    }

    /// Number of upstream calls made so far.
    pub fn calls(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Every prompt received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, gemini::Error> {
        let mut state = self.lock();
        state.prompts.push(prompt.to_string());

        match state.replies.pop_front() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::NetworkError(message)) => Err(gemini::Error::Network(message)),
            Some(MockReply::ApiError { status, message }) => {
                Err(gemini::Error::Api { status, message })
            }
            None => Err(gemini::Error::Network(
                "mock generator has no more scripted replies".to_string(),
            )),
        }
    }
}

// ============================================================================
// Sample content
// ============================================================================

/// Five valid questions with correct answers 2, 0, 3, 1, 2.
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new(
            "Which planet is known as the Red Planet?",
            ["Venus", "Jupiter", "Mars", "Saturn"],
            2,
        )
        .with_explanation("Iron oxide on its surface gives Mars its red color."),
        Question::new(
            "What gas do plants absorb during photosynthesis?",
            ["Carbon dioxide", "Oxygen", "Nitrogen", "Helium"],
            0,
        ),
        Question::new(
            "What is the powerhouse of the cell?",
            ["Nucleus", "Ribosome", "Golgi apparatus", "Mitochondria"],
            3,
        )
        .with_explanation("Mitochondria produce most of the cell's ATP."),
        Question::new(
            "What is the chemical symbol for gold?",
            ["Ag", "Au", "Gd", "Go"],
            1,
        ),
        Question::new(
            "How many bones are in the adult human body?",
            ["106", "186", "206", "306"],
            2,
        ),
    ]
}

/// Correct option index for each of [`sample_questions`].
pub fn sample_correct_answers() -> Vec<u8> {
    sample_questions().iter().map(|q| q.correct_answer).collect()
}

/// A questions payload as the model would return it.
pub fn questions_json() -> String {
    serde_json::json!({ "questions": sample_questions() }).to_string()
}

/// A feedback payload as the model would return it.
pub fn feedback_json(score_message: &str, feedback: &str) -> String {
    serde_json::json!({ "feedback": feedback, "scoreMessage": score_message }).to_string()
}

// ============================================================================
// Harness
// ============================================================================

/// Test harness for running quiz scenarios against a [`MockGenerator`].
///
/// Retries happen without delay so scenarios run instantly.
pub struct TestHarness {
    /// The app under test.
    pub app: QuizApp<MockGenerator>,
    /// Shared handle to the app's generator script.
    pub generator: MockGenerator,
}

impl TestHarness {
    pub fn new() -> Self {
        let generator = MockGenerator::default();
        let config = GeneratorConfig::default().with_retry_delay(Duration::ZERO);
        let app = QuizApp::new(QuizGenerator::new(generator.clone()).with_config(config));
        Self { app, generator }
    }

    /// Queue a valid set of questions.
    pub fn expect_questions(&mut self) -> &mut Self {
        self.generator.queue(MockReply::text(questions_json()));
        self
    }

    /// Queue a feedback reply.
    pub fn expect_feedback(&mut self, score_message: &str, feedback: &str) -> &mut Self {
        self.generator
            .queue(MockReply::text(feedback_json(score_message, feedback)));
        self
    }

    /// Queue `count` consecutive upstream failures.
    pub fn expect_failures(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.generator
                .queue(MockReply::network_error("simulated outage"));
        }
        self
    }

    /// Answer every question, moving from the first to the last.
    pub fn answer_all(&mut self, answers: &[u8]) {
        while self.app.session().current_question_index > 0 {
            self.app.previous_question();
        }
        for (i, &option) in answers.iter().enumerate() {
            if i > 0 {
                self.app.next_question();
            }
            if let Err(e) = self.app.answer(option) {
                panic!("answer {option} for question {i} was rejected: {e}");
            }
        }
    }

    pub fn session(&self) -> &Session {
        self.app.session()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the session is on `screen` with no error showing.
#[track_caller]
pub fn assert_screen(session: &Session, screen: Screen) {
    assert_eq!(
        session.current_screen, screen,
        "Expected screen {screen}, got {}",
        session.current_screen
    );
}

/// Assert an error message is set.
#[track_caller]
pub fn assert_has_error(session: &Session) {
    assert!(session.error.is_some(), "Expected an error to be set");
}

/// Assert no error message is set.
#[track_caller]
pub fn assert_no_error(session: &Session) {
    assert!(
        session.error.is_none(),
        "Expected no error, got {:?}",
        session.error
    );
}

/// Assert every answer slot is unanswered.
#[track_caller]
pub fn assert_all_unanswered(session: &Session) {
    assert!(
        session.answers.iter().all(|a| *a == AnswerSlot::Unanswered),
        "Expected all answers unanswered, got {:?}",
        session.answers
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockGenerator::new(vec![
            MockReply::text("first"),
            MockReply::api_error(500, "boom"),
        ]);

        assert_eq!(mock.complete("a").await.unwrap(), "first");
        assert!(matches!(
            mock.complete("b").await,
            Err(gemini::Error::Api { status: 500, .. })
        ));
        assert!(matches!(
            mock.complete("c").await,
            Err(gemini::Error::Network(_))
        ));
        assert_eq!(mock.prompts(), vec!["a", "b", "c"]);
        assert_eq!(mock.remaining(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let mock = MockGenerator::default();
        let handle = mock.clone();
        handle.queue(MockReply::text("hello"));

        assert_eq!(mock.complete("prompt").await.unwrap(), "hello");
        assert_eq!(handle.calls(), 1);
    }

    #[test]
    fn test_sample_content() {
        assert_eq!(sample_questions().len(), 5);
        assert_eq!(sample_correct_answers(), vec![2, 0, 3, 1, 2]);

        let json: serde_json::Value = serde_json::from_str(&questions_json()).unwrap();
        assert_eq!(json["questions"][0]["correctAnswer"], 2);
    }

    #[tokio::test]
    async fn test_harness_scripted_quiz() {
        let mut harness = TestHarness::new();
        harness
            .expect_questions()
            .expect_feedback("Perfect!", "Flawless run.");

        harness.app.select_topic("Science & Discovery").await;
        harness.answer_all(&sample_correct_answers());
        harness.app.finish().await.unwrap();

        assert_screen(harness.session(), Screen::Results);
        assert_no_error(harness.session());
        assert_eq!(harness.session().score, 5);
        assert_eq!(harness.generator.calls(), 2);
    }
}
