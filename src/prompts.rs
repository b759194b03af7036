//! Prompt blueprints for the four generation variants.
//!
//! Each "multiple" template is derived from its "single" sibling by swapping
//! the clause that asks for one question. Placeholders use `{name}` syntax and
//! are filled in a single pass, so substituted values (format instructions
//! carry JSON braces) are never re-scanned.

use std::fmt;
use std::sync::LazyLock;

const HISTORY_SINGLE_QUIZ_TEXT: &str = r#"
You are an expert in history education. Based on the following content: "{content}"
and the keywords: {keywords}, generate a single history quiz question.
Ensure that the question has a clear difficulty level, which can be either easy, medium, or hard.
Provide four options for the answer, ensuring that the correct answer is not always the first option.
Each option should include a reason for why it's correct or incorrect.
Label the difficulty level of the quiz question in the response.
The response should be in the following JSON format:
{format_instructions}
"#;

const HISTORY_SINGLE_CLAUSE: &str = "generate a single history quiz question";
const HISTORY_MULTIPLE_CLAUSE: &str = "generate {num_quizzes} different history quiz questions, \
each with a different difficulty level (easy, medium, hard).";

const MATH_SINGLE_QUIZ_TEXT: &str = r#"
You are an expert in mathematics education. Generate a math word problem that involves a real-life situation
requiring solving for two variables in a system of linear equations.

1. The problem can involve solving for one variable when another variable is given (e.g., x + 2y = 10, where y = 3).
   Ensure to provide similar examples in your problem statement.
2. Ensure that the problem is logically sound and does not contain negative numbers.
3. Provide four options for the solution, ensuring that there is always one correct answer, which is not necessarily the first option.
4. Each option should include a detailed explanation. For incorrect options, provide the specific incorrect calculation steps (e.g., "x = 10 - 2*3 = 5", but this ignores the sign change) and explain why these lead to the wrong result. For the correct option, show the correct steps and the reasoning behind the correct answer.
5. When generating multiple problems, ensure there is a differentiation in difficulty levels and introduce variety in the problems.

The response should be in the following JSON format:
{format_instructions}
"#;

const MATH_SINGLE_CLAUSE: &str = "Generate a math word problem";
const MATH_MULTIPLE_CLAUSE: &str = "Generate {num_quizzes} different math word problems. \
These problems must incorporate varying levels of complexity and **must not** include any indication of \
difficulty level while ensuring logical consistency without negative numbers.";

static HISTORY_SINGLE_QUIZ: LazyLock<PromptTemplate> =
    LazyLock::new(|| PromptTemplate::new(HISTORY_SINGLE_QUIZ_TEXT));
static HISTORY_MULTIPLE_QUIZZES: LazyLock<PromptTemplate> =
    LazyLock::new(|| HISTORY_SINGLE_QUIZ.derive(HISTORY_SINGLE_CLAUSE, HISTORY_MULTIPLE_CLAUSE));
static MATH_SINGLE_QUIZ: LazyLock<PromptTemplate> =
    LazyLock::new(|| PromptTemplate::new(MATH_SINGLE_QUIZ_TEXT));
static MATH_MULTIPLE_QUIZZES: LazyLock<PromptTemplate> =
    LazyLock::new(|| MATH_SINGLE_QUIZ.derive(MATH_SINGLE_CLAUSE, MATH_MULTIPLE_CLAUSE));

/// Which of the four blueprints to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    HistorySingle,
    HistoryMultiple,
    MathSingle,
    MathMultiple,
}

impl PromptKind {
    pub fn template(self) -> &'static PromptTemplate {
        match self {
            Self::HistorySingle => &HISTORY_SINGLE_QUIZ,
            Self::HistoryMultiple => &HISTORY_MULTIPLE_QUIZZES,
            Self::MathSingle => &MATH_SINGLE_QUIZ,
            Self::MathMultiple => &MATH_MULTIPLE_QUIZZES,
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::HistorySingle => write!(f, "history_single"),
            PromptKind::HistoryMultiple => write!(f, "history_multiple"),
            PromptKind::MathSingle => write!(f, "math_single"),
            PromptKind::MathMultiple => write!(f, "math_multiple"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build a sibling template with `from` replaced by `to`.
    pub fn derive(&self, from: &str, to: &str) -> Self {
        debug_assert!(self.text.contains(from), "clause {from:?} not in template");
        Self::new(self.text.replace(from, to))
    }

    /// Fill `{name}` placeholders from `vars`. Braces that do not name a
    /// provided variable are kept literally.
    pub fn render(&self, vars: &[(&str, String)]) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let hit = after.find('}').and_then(|close| {
                let name = &after[..close];
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (value, close))
            });
            match hit {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}
