pub mod api;
pub mod clients;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod interceptors;
pub mod json_utils;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod schema;
pub mod telemetry;

// Convenient re-exports
pub use crate::core::{Generation, LowLevelClient, QuizResolver};
pub use generator::{HistoryQuizGenerator, MathQuizGenerator, QuizGenerator};
pub use orchestrator::{CombinedQuizzes, QuizService};
pub use schema::{Quiz, QuizOption, Quizzes, SENTINEL_QUESTION};
