//! Question and feedback generation.
//!
//! [`QuizGenerator`] turns a text-generation service into quiz content. Every
//! upstream call is retried a bounded number of times with a fixed delay.
//! Question generation reports failure to the caller; feedback generation
//! never does and falls back to a locally computed [`FeedbackResult`].

mod parse;
pub mod prompts;

pub use parse::strip_code_fences;

use crate::feedback::FeedbackResult;
use crate::question::Question;
use async_trait::async_trait;
use gemini::Gemini;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors from question generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] gemini::Error),

    #[error("Response is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Response does not match the expected format: {0}")]
    Schema(serde_json::Error),

    #[error("Expected {expected} questions, got {actual}")]
    WrongQuestionCount { expected: usize, actual: usize },

    #[error("Question {index} has {count} options, expected 4")]
    WrongOptionCount { index: usize, count: usize },

    #[error("Question {index} has an invalid correct answer: {answer:?}")]
    InvalidCorrectAnswer { index: usize, answer: Option<i64> },

    #[error("Question {index} has no text")]
    EmptyQuestion { index: usize },

    #[error("Feedback response is missing `{0}`")]
    IncompleteFeedback(&'static str),
}

/// A service that answers a single natural-language instruction with text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, gemini::Error>;
}

#[async_trait]
impl TextGenerator for Gemini {
    async fn complete(&self, prompt: &str) -> Result<String, gemini::Error> {
        let request = gemini::Request::prompt(prompt).with_response_mime_type("application/json");
        let text = self.generate(request).await?.text();
        if text.trim().is_empty() {
            return Err(gemini::Error::EmptyResponse);
        }
        Ok(text)
    }
}

/// Configuration for the quiz generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Total upstream attempts per generation, including the first.
    pub max_attempts: u32,

    /// Fixed pause between attempts.
    pub retry_delay: Duration,

    /// Model override for the Gemini client.
    pub model: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
            model: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Generates quiz questions and feedback through a [`TextGenerator`].
pub struct QuizGenerator<G = Gemini> {
    client: G,
    config: GeneratorConfig,
}

impl QuizGenerator<Gemini> {
    /// Create a Gemini-backed generator from the GEMINI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_env_with_config(GeneratorConfig::default())
    }

    /// Like [`QuizGenerator::from_env`], applying `config` (including its model).
    pub fn from_env_with_config(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let mut client = Gemini::from_env()?;
        if let Some(ref model) = config.model {
            client = client.with_model(model);
        }
        Ok(Self { client, config })
    }
}

impl<G: TextGenerator> QuizGenerator<G> {
    pub fn new(client: G) -> Self {
        Self {
            client,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn client(&self) -> &G {
        &self.client
    }

    /// Generate the questions for a quiz on `topic`.
    pub async fn generate_questions(&self, topic: &str) -> Result<Vec<Question>, GenerationError> {
        let value = self.request_json(&prompts::questions(topic)).await?;
        let questions = parse::questions(value)?;
        tracing::info!(topic, count = questions.len(), "generated quiz questions");
        Ok(questions)
    }

    /// Generate feedback for a finished quiz. Never fails.
    pub async fn generate_feedback(&self, score: usize, total: usize, topic: &str) -> FeedbackResult {
        match self.request_feedback(score, total, topic).await {
            Ok(feedback) => feedback,
            Err(error) => {
                tracing::warn!(%error, score, total, topic, "feedback unavailable, using local fallback");
                FeedbackResult::fallback(score, total, topic)
            }
        }
    }

    async fn request_feedback(
        &self,
        score: usize,
        total: usize,
        topic: &str,
    ) -> Result<FeedbackResult, GenerationError> {
        let value = self.request_json(&prompts::feedback(score, total, topic)).await?;
        parse::feedback(value)
    }

    /// Call the upstream and decode its reply as JSON, retrying on any failure.
    ///
    /// Only the last attempt's error is returned.
    async fn request_json(&self, prompt: &str) -> Result<Value, GenerationError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            tracing::debug!(attempt, max_attempts, "requesting generation");

            let result = match self.client.complete(prompt).await {
                Ok(text) => parse::parse_json(&text),
                Err(error) => Err(GenerationError::from(error)),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(error) if attempt < max_attempts => {
                    tracing::warn!(attempt, max_attempts, %error, "generation attempt failed, retrying");
                }
                Err(error) => {
                    tracing::warn!(attempt, max_attempts, %error, "generation attempt failed, giving up");
                    return Err(error);
                }
            }

            attempt += 1;
            tokio::time::sleep(self.config.retry_delay).await;
        }
    }
}
