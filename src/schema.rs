//! Shapes exchanged with the model and returned to callers.
//!
//! Validation is purely structural: a reply either deserializes into these
//! types or it does not. Option count and the single-correct-answer rule are
//! only requested in the prompt text.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Question text carried by a sentinel quiz.
pub const SENTINEL_QUESTION: &str = "Error generating quiz";

/// One answer option of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "Option")]
pub struct QuizOption {
    #[schemars(description = "The content of the option.")]
    pub content: String,
    #[schemars(
        description = "A complete, concise and meaningful reason why the option is correct or incorrect."
    )]
    pub reason: String,
    #[serde(rename = "isCorrect")]
    #[schemars(description = "Indicate whether the option is 'Correct' or 'Incorrect'.")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Quiz {
    #[schemars(description = "The content of the question.")]
    pub question: String,
    #[schemars(description = "Four options of the question.")]
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Quizzes {
    #[schemars(description = "A List of questions.")]
    pub quizzes: Vec<Quiz>,
}

/// Types with a well-formed placeholder standing in for a failed generation.
pub trait Sentinel {
    fn sentinel() -> Self;
}

impl Sentinel for Quiz {
    fn sentinel() -> Self {
        Self {
            question: SENTINEL_QUESTION.to_string(),
            options: Vec::new(),
        }
    }
}

impl Sentinel for Quizzes {
    fn sentinel() -> Self {
        Self {
            quizzes: vec![Quiz::sentinel()],
        }
    }
}

impl Quiz {
    pub fn is_sentinel(&self) -> bool {
        self.question == SENTINEL_QUESTION && self.options.is_empty()
    }
}
