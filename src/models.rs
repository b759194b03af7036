//! Caller-supplied parameters for quiz generation.

use serde::{Deserialize, Serialize};

/// Topic and keywords for one history quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTestCase {
    #[serde(default = "default_content")]
    pub content: String,
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl HistoryTestCase {
    pub fn new(content: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            content: content.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Default for HistoryTestCase {
    fn default() -> Self {
        Self {
            content: default_content(),
            keywords: default_keywords(),
        }
    }
}

fn default_content() -> String {
    "Reformation".to_string()
}

fn default_keywords() -> Vec<String> {
    vec!["Martin Luther".to_string(), "Roman Catholic Church".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTestCases {
    #[serde(default = "sample_history_cases")]
    pub cases: Vec<HistoryTestCase>,
}

impl Default for HistoryTestCases {
    fn default() -> Self {
        Self { cases: sample_history_cases() }
    }
}

/// The three sample topics used by the demo runner and as request defaults.
pub fn sample_history_cases() -> Vec<HistoryTestCase> {
    vec![
        HistoryTestCase::new("Reformation", &["Martin Luther", "Roman Catholic Church"]),
        HistoryTestCase::new("World War II", &["J. Robert Oppenheimer"]),
        HistoryTestCase::new("Civil War", &["slavery"]),
    ]
}

/// Math quizzes are topic-free; any fields a caller sends are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathTestCase {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_case_fields_default_individually() {
        let case: HistoryTestCase = serde_json::from_str(r#"{"content": "Civil War"}"#).unwrap();
        assert_eq!(case.content, "Civil War");
        assert_eq!(case.keywords, default_keywords());
    }

    #[test]
    fn missing_cases_fall_back_to_samples() {
        let cases: HistoryTestCases = serde_json::from_str("{}").unwrap();
        assert_eq!(cases.cases.len(), 3);
        assert_eq!(cases.cases[1].keywords, vec!["J. Robert Oppenheimer"]);
    }

    #[test]
    fn math_case_ignores_unknown_fields() {
        let case: MathTestCase = serde_json::from_str(r#"{"content": "Solve x if x + 2 = 5"}"#).unwrap();
        assert_eq!(case, MathTestCase {});
    }

    #[test]
    fn keywords_must_be_strings() {
        assert!(serde_json::from_str::<HistoryTestCase>(r#"{"content": "x", "keywords": [1]}"#).is_err());
    }
}
