//! Play one quiz against the live Gemini API, answering at random.
//!
//! Run with: `cargo run -p quiz-core --example headless_quiz -- [topic-id]`

use quiz_core::{topics, Advance, QuizApp, QuizGenerator, Screen, View, TOPICS};
use rand::Rng;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let topic_id = std::env::args().nth(1).unwrap_or_else(|| "science".to_string());
    let Some(topic) = topics::find(&topic_id) else {
        let ids: Vec<_> = TOPICS.iter().map(|t| t.id).collect();
        return Err(format!("unknown topic '{topic_id}', expected one of: {}", ids.join(", ")).into());
    };

    println!("=== {} ===", topic.name);
    println!("{}\n", topic.description);

    let mut app = QuizApp::new(QuizGenerator::from_env()?);
    app.select_topic(topic.name).await;

    if let View::Error(message) = app.session().view() {
        println!("Error: {message}");
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    while app.session().current_screen == Screen::Quiz {
        let session = app.session();
        let Some(question) = session.current_question() else {
            break;
        };

        println!(
            "Question {} of {}: {}",
            session.current_question_index + 1,
            session.questions.len(),
            question.question
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }

        let choice: u8 = rng.gen_range(0..4);
        println!("  -> {}\n", question.options[usize::from(choice)]);

        app.answer(choice)?;
        if app.advance().await == Advance::Blocked {
            break;
        }
    }

    let session = app.session();
    println!("=== Results: {}/{} ({}%) ===", session.score, session.questions.len(), session.percentage());
    if let Some(feedback) = &session.feedback {
        println!("{}\n{}\n", feedback.score_message, feedback.feedback);
    }
    for review in session.review() {
        let mark = if review.is_correct { "correct" } else { "wrong" };
        println!("{}. {} [{mark}]", review.number, review.question.question);
        if !review.is_correct {
            println!("   Answer: {}", review.question.correct_option());
        }
        if let Some(explanation) = &review.question.explanation {
            println!("   {explanation}");
        }
    }

    Ok(())
}
