//! History and math quiz generators.
//!
//! Both implement [`QuizGenerator`]. The `generate_*` methods return a
//! [`Generation`] so callers can see what failed; the `create_*` methods fold
//! any failure into the sentinel value and never error.

use crate::core::{Generation, LowLevelClient, QuizResolver};
use crate::error::QuizError;
use crate::models::{HistoryTestCase, MathTestCase};
use crate::prompts::PromptKind;
use crate::schema::{Quiz, Quizzes};
use async_trait::async_trait;
use tracing::{error, instrument};

#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Caller parameters the prompt is filled from.
    type Params: Send + Sync;

    fn subject(&self) -> &'static str;

    async fn generate_quiz(&self, params: &Self::Params) -> Generation<Quiz>;

    async fn generate_quizzes(&self, params: &Self::Params, num_quizzes: u32) -> Generation<Quizzes>;

    /// One quiz, or the sentinel quiz on failure.
    async fn create_quiz(&self, params: &Self::Params) -> Quiz {
        self.generate_quiz(params).await.into_value()
    }

    /// `num_quizzes` quizzes, or a batch holding one sentinel quiz on failure.
    async fn create_quizzes(&self, params: &Self::Params, num_quizzes: u32) -> Quizzes {
        self.generate_quizzes(params, num_quizzes).await.into_value()
    }
}

fn settle<T>(result: Result<T, QuizError>, what: &str) -> Generation<T> {
    if let Err(e) = &result {
        error!(error = %e, "Error generating {}", what);
    }
    result.into()
}

/// Quizzes about a topic, steered by keywords.
#[derive(Debug, Clone)]
pub struct HistoryQuizGenerator<C: LowLevelClient> {
    resolver: QuizResolver<C>,
}

impl<C: LowLevelClient> HistoryQuizGenerator<C> {
    pub fn new(resolver: QuizResolver<C>) -> Self {
        Self { resolver }
    }

    fn topic_vars(params: &HistoryTestCase) -> Vec<(&'static str, String)> {
        vec![
            ("content", params.content.clone()),
            ("keywords", format!("{:?}", params.keywords)),
        ]
    }
}

#[async_trait]
impl<C: LowLevelClient> QuizGenerator for HistoryQuizGenerator<C> {
    type Params = HistoryTestCase;

    fn subject(&self) -> &'static str {
        "history"
    }

    #[instrument(skip(self, params), fields(subject = "history", content = %params.content))]
    async fn generate_quiz(&self, params: &HistoryTestCase) -> Generation<Quiz> {
        let vars = Self::topic_vars(params);
        let result = self.resolver.resolve::<Quiz>(PromptKind::HistorySingle, &vars).await;
        settle(result, "history quiz")
    }

    #[instrument(skip(self, params), fields(subject = "history", content = %params.content))]
    async fn generate_quizzes(&self, params: &HistoryTestCase, num_quizzes: u32) -> Generation<Quizzes> {
        let mut vars = Self::topic_vars(params);
        vars.push(("num_quizzes", num_quizzes.to_string()));
        let result = self.resolver.resolve::<Quizzes>(PromptKind::HistoryMultiple, &vars).await;
        settle(result, "multiple history quizzes")
    }
}

/// Self-contained word problems over a system of two linear equations.
#[derive(Debug, Clone)]
pub struct MathQuizGenerator<C: LowLevelClient> {
    resolver: QuizResolver<C>,
}

impl<C: LowLevelClient> MathQuizGenerator<C> {
    pub fn new(resolver: QuizResolver<C>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl<C: LowLevelClient> QuizGenerator for MathQuizGenerator<C> {
    type Params = MathTestCase;

    fn subject(&self) -> &'static str {
        "math"
    }

    #[instrument(skip_all, fields(subject = "math"))]
    async fn generate_quiz(&self, _params: &MathTestCase) -> Generation<Quiz> {
        let result = self.resolver.resolve::<Quiz>(PromptKind::MathSingle, &[]).await;
        settle(result, "math quiz")
    }

    #[instrument(skip(self, _params), fields(subject = "math"))]
    async fn generate_quizzes(&self, _params: &MathTestCase, num_quizzes: u32) -> Generation<Quizzes> {
        let vars = [("num_quizzes", num_quizzes.to_string())];
        let result = self.resolver.resolve::<Quizzes>(PromptKind::MathMultiple, &vars).await;
        settle(result, "multiple math quizzes")
    }
}
