//! Quiz engine with AI-generated questions and feedback.
//!
//! This crate provides:
//! - A pure, synchronous session reducer (topic selection, loading, quiz, results)
//! - A question/feedback generator with bounded retries and local fallback
//! - A headless orchestrator that wires the two together
//! - The built-in topic catalogue
//!
//! # Quick Start
//!
//! ```ignore
//! use quiz_core::{QuizApp, QuizGenerator, Screen};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut app = QuizApp::new(QuizGenerator::from_env()?);
//!
//!     app.select_topic("Tech Trends").await;
//!     assert_eq!(app.session().current_screen, Screen::Quiz);
//!
//!     println!("{}", app.session().questions[0].question);
//!     Ok(())
//! }
//! ```

pub mod feedback;
pub mod generator;
pub mod headless;
pub mod question;
pub mod session;
pub mod testing;
pub mod topics;

// Primary public API
pub use feedback::{FeedbackResult, ScoreTier};
pub use generator::{GenerationError, GeneratorConfig, QuizGenerator, TextGenerator};
pub use headless::{Advance, QuizApp, QuizError, QUESTION_FAILURE_MESSAGE};
pub use question::{AnswerSlot, Question, OPTION_COUNT, QUESTION_COUNT};
pub use session::{reduce, Action, QuestionReview, Screen, Session, SessionError, View};
pub use testing::{MockGenerator, MockReply, TestHarness};
pub use topics::{Topic, TOPICS};
