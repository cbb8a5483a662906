//! Integration tests that call the real Gemini API.
//!
//! These tests require GEMINI_API_KEY to be set (via .env file or environment).
//! Run with: `cargo test -p quiz-core --test api_integration -- --ignored`
//!
//! These are marked #[ignore] by default to avoid:
//! - API costs in CI
//! - Test failures when no API key is available
//! - Slow test runs (API calls take seconds)

use quiz_core::{QuizApp, QuizGenerator, Screen};

/// Load environment variables from .env file
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if API key is available
fn has_api_key() -> bool {
    std::env::var("GEMINI_API_KEY").is_ok()
}

#[tokio::test]
#[ignore]
async fn test_generate_questions_live() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: GEMINI_API_KEY not set");
        return;
    }

    let generator = QuizGenerator::from_env().expect("Failed to create generator");
    let questions = generator
        .generate_questions("Science & Discovery")
        .await
        .expect("Generation should succeed");

    assert_eq!(questions.len(), 5);
    for q in &questions {
        println!("Q: {} -> {}", q.question, q.correct_option());
        assert!(!q.question.is_empty());
        assert!(q.correct_answer < 4);
    }
}

#[tokio::test]
#[ignore]
async fn test_generate_feedback_live() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: GEMINI_API_KEY not set");
        return;
    }

    let generator = QuizGenerator::from_env().expect("Failed to create generator");
    let feedback = generator.generate_feedback(3, 5, "Tech Trends").await;

    println!("{}\n{}", feedback.score_message, feedback.feedback);
    assert!(!feedback.score_message.is_empty());
    assert!(!feedback.feedback.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_full_quiz_live() {
    setup();
    if !has_api_key() {
        eprintln!("Skipping test: GEMINI_API_KEY not set");
        return;
    }

    let mut app = QuizApp::new(QuizGenerator::from_env().expect("Failed to create generator"));

    app.select_topic_by_id("general-knowledge")
        .await
        .expect("Known topic");
    assert!(app.session().error.is_none(), "{:?}", app.session().error);
    assert_eq!(app.session().current_screen, Screen::Quiz);

    for _ in 0..5 {
        app.answer(0).expect("Valid answer");
        app.advance().await;
    }

    let session = app.session();
    assert_eq!(session.current_screen, Screen::Results);
    assert!(session.feedback.is_some());
    println!("Score: {}/5 ({}%)", session.score, session.percentage());
}
