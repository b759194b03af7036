//! Fan-out/fan-in over independent generator calls.
//!
//! Every call runs as its own task around a fresh generator; nothing is shared
//! between tasks except the (cloned) client handle. Results come back in input
//! order no matter which task finishes first.

use crate::core::{LowLevelClient, QuizResolver};
use crate::error::QuizError;
use crate::generator::{HistoryQuizGenerator, MathQuizGenerator, QuizGenerator};
use crate::interceptors::Interceptor;
use crate::models::{HistoryTestCase, MathTestCase};
use crate::schema::{Quiz, Quizzes};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{info, instrument};

/// One history batch and one math batch generated side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedQuizzes {
    pub history_quiz: Quizzes,
    pub math_quiz: Quizzes,
}

#[derive(Debug, Clone)]
pub struct QuizService<C: LowLevelClient + Clone + 'static> {
    resolver: QuizResolver<C>,
}

impl<C: LowLevelClient + Clone + 'static> QuizService<C> {
    pub fn new(client: C) -> Self {
        Self { resolver: QuizResolver::new(client) }
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.resolver = self.resolver.with_interceptor(interceptor);
        self
    }

    pub fn client(&self) -> &C {
        self.resolver.client()
    }

    fn history_generator(&self) -> HistoryQuizGenerator<C> {
        HistoryQuizGenerator::new(self.resolver.clone())
    }

    fn math_generator(&self) -> MathQuizGenerator<C> {
        MathQuizGenerator::new(self.resolver.clone())
    }

    /// One history quiz per case, in the order of `cases`.
    #[instrument(skip_all, fields(cases = cases.len()))]
    pub async fn history_questions(&self, cases: Vec<HistoryTestCase>) -> Result<Vec<Quiz>, QuizError> {
        let started = Instant::now();
        let total = cases.len();
        let mut join_set = JoinSet::new();

        for (index, case) in cases.into_iter().enumerate() {
            let generator = self.history_generator();
            join_set.spawn(async move { (index, generator.create_quiz(&case).await) });
        }

        let mut slots: Vec<Option<Quiz>> = vec![None; total];
        while let Some(joined) = join_set.join_next().await {
            let (index, quiz) = joined?;
            slots[index] = Some(quiz);
        }

        let quizzes: Vec<Quiz> = slots.into_iter().flatten().collect();
        let failed = quizzes.iter().filter(|q| q.is_sentinel()).count();
        info!(total, failed, elapsed_ms = started.elapsed().as_millis() as u64, "History batch complete");
        Ok(quizzes)
    }

    /// A single topic-free math quiz, run on a worker task.
    #[instrument(skip_all)]
    pub async fn math_question(&self, case: MathTestCase) -> Result<Quiz, QuizError> {
        let generator = self.math_generator();
        let quiz = tokio::spawn(async move { generator.create_quiz(&case).await }).await?;
        info!(failed = quiz.is_sentinel(), "Math quiz complete");
        Ok(quiz)
    }

    /// `num_quizzes` history quizzes about `history` and `num_quizzes` math
    /// quizzes, generated concurrently. `math` carries no parameters.
    #[instrument(skip(self, history, math), fields(content = %history.content))]
    pub async fn generate_quizzes(
        &self,
        history: HistoryTestCase,
        math: MathTestCase,
        num_quizzes: u32,
    ) -> Result<CombinedQuizzes, QuizError> {
        let started = Instant::now();
        let history_generator = self.history_generator();
        let math_generator = self.math_generator();
        let subjects = (history_generator.subject(), math_generator.subject());

        let history_task = tokio::spawn(async move {
            history_generator.create_quizzes(&history, num_quizzes).await
        });
        let math_task = tokio::spawn(async move {
            math_generator.create_quizzes(&math, num_quizzes).await
        });

        let (history_quiz, math_quiz) = tokio::join!(history_task, math_task);
        let combined = CombinedQuizzes {
            history_quiz: history_quiz?,
            math_quiz: math_quiz?,
        };

        info!(
            subjects = ?subjects,
            history = combined.history_quiz.quizzes.len(),
            math = combined.math_quiz.quizzes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Combined generation complete"
        );
        Ok(combined)
    }
}
