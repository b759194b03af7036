
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_forge::clients::mock::{MockClient, MockResponse};
use quiz_forge::core::QuizResolver;
use quiz_forge::generator::{HistoryQuizGenerator, MathQuizGenerator, QuizGenerator};
use quiz_forge::interceptors::Interceptor;
use quiz_forge::models::{HistoryTestCase, MathTestCase};
use quiz_forge::schema::{Quiz, Quizzes, SENTINEL_QUESTION};
use quiz_forge::Generation;

use crate::test_utils::{mock_resolver, quiz_json, quizzes_json, reformation_quiz, REFORMATION_QUIZ_JSON};

fn reformation_case() -> HistoryTestCase {
    HistoryTestCase::new("Reformation", &["Martin Luther", "Roman Catholic Church"])
}

#[tokio::test]
async fn history_quiz_returns_model_payload_unmodified() {
    let (resolver, handle) = mock_resolver(vec![MockResponse::text(REFORMATION_QUIZ_JSON)]);
    let generator = HistoryQuizGenerator::new(resolver);

    let quiz = generator.create_quiz(&reformation_case()).await;

    assert_eq!(quiz, reformation_quiz());
    assert_eq!(quiz.options.len(), 4);
    assert_eq!(handle.call_count(), 1);
}

#[tokio::test]
async fn history_prompt_interpolates_content_keywords_and_schema() {
    let (resolver, handle) = mock_resolver(vec![MockResponse::text(REFORMATION_QUIZ_JSON)]);
    HistoryQuizGenerator::new(resolver).create_quiz(&reformation_case()).await;

    let prompt = &handle.prompts()[0];
    assert!(prompt.contains(r#"Based on the following content: "Reformation""#));
    assert!(prompt.contains(r#"the keywords: ["Martin Luther", "Roman Catholic Church"]"#));
    assert!(prompt.contains("generate a single history quiz question"));
    assert!(prompt.contains("\"isCorrect\""));
    assert!(!prompt.contains("{format_instructions}"));
    assert!(!prompt.contains("{content}"));
}

#[tokio::test]
async fn non_json_reply_yields_sentinel() {
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text("I'm sorry, I cannot help with that.")]);
    let quiz = HistoryQuizGenerator::new(resolver).create_quiz(&reformation_case()).await;

    assert_eq!(quiz, Quiz { question: SENTINEL_QUESTION.to_string(), options: vec![] });
}

#[tokio::test]
async fn transport_failure_yields_sentinel() {
    let (resolver, _handle) = mock_resolver(vec![MockResponse::error("connection reset")]);
    let quiz = MathQuizGenerator::new(resolver).create_quiz(&MathTestCase::default()).await;

    assert!(quiz.is_sentinel());
}

#[tokio::test]
async fn shape_mismatch_is_reported_as_failed_generation() {
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text(r#"{"question": "No options here"}"#)]);
    let generation = HistoryQuizGenerator::new(resolver).generate_quiz(&reformation_case()).await;

    assert!(!generation.is_generated());
    assert!(generation.diagnostic().unwrap().contains("Response parse error"));
    assert!(generation.into_value().is_sentinel());
}

#[tokio::test]
async fn transport_failure_diagnostic_names_the_model_call() {
    let (resolver, _handle) = mock_resolver(vec![MockResponse::error("timed out")]);
    let generation = HistoryQuizGenerator::new(resolver).generate_quiz(&reformation_case()).await;

    let diagnostic = generation.diagnostic().unwrap();
    assert!(diagnostic.contains("Model invocation failed"));
    assert!(diagnostic.contains("timed out"));
}

#[tokio::test]
async fn failed_batch_yields_single_sentinel_quiz() {
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text("not json")]);
    let quizzes = HistoryQuizGenerator::new(resolver)
        .create_quizzes(&reformation_case(), 3)
        .await;

    assert_eq!(quizzes.quizzes.len(), 1);
    assert!(quizzes.quizzes[0].is_sentinel());
}

#[tokio::test]
async fn fenced_reply_is_accepted() {
    let fenced = format!("Here is your quiz:\n```json\n{}\n```", quiz_json("fractions"));
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text(fenced)]);
    let generation = MathQuizGenerator::new(resolver).generate_quiz(&MathTestCase::default()).await;

    match generation {
        Generation::Generated(quiz) => assert_eq!(quiz.question, "Question about fractions?"),
        Generation::Failed { diagnostic } => panic!("expected a quiz, got {}", diagnostic),
    }
}

#[tokio::test]
async fn option_count_is_not_validated() {
    let three_options = r#"{"question": "Pick one", "options": [
        {"content": "a", "reason": "r", "isCorrect": true},
        {"content": "b", "reason": "r", "isCorrect": true},
        {"content": "c", "reason": "r", "isCorrect": false}
    ]}"#;
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text(three_options)]);
    let quiz = MathQuizGenerator::new(resolver).create_quiz(&MathTestCase::default()).await;

    assert_eq!(quiz.options.len(), 3);
    assert!(!quiz.is_sentinel());
}

#[tokio::test]
async fn math_prompts_are_topic_free() {
    let (resolver, handle) = mock_resolver(vec![
        MockResponse::text(quiz_json("apples")).when("Generate a math word problem"),
        MockResponse::text(quizzes_json("trains", 4)).when("Generate 4 different math word problems"),
    ]);
    let generator = MathQuizGenerator::new(resolver);

    let quiz = generator.create_quiz(&MathTestCase::default()).await;
    let quizzes: Quizzes = generator.create_quizzes(&MathTestCase::default(), 4).await;

    assert_eq!(quiz.question, "Question about apples?");
    assert_eq!(quizzes.quizzes.len(), 4);
    for prompt in handle.prompts() {
        assert!(prompt.contains("system of linear equations"));
        assert!(!prompt.contains("{content}"));
        assert!(!prompt.contains("{num_quizzes}"));
        assert!(!prompt.contains("keywords"));
    }
}

#[tokio::test]
async fn history_batch_prompt_requests_labels_per_question() {
    let (resolver, handle) = mock_resolver(vec![MockResponse::text(quizzes_json("Reformation", 2))]);
    let quizzes = HistoryQuizGenerator::new(resolver)
        .create_quizzes(&reformation_case(), 2)
        .await;

    assert_eq!(quizzes.quizzes.len(), 2);
    let prompt = &handle.prompts()[0];
    assert!(prompt.contains("generate 2 different history quiz questions"));
    assert!(prompt.contains("each with a different difficulty level (easy, medium, hard)"));
    assert!(prompt.contains("\"quizzes\""));
}

#[tokio::test]
async fn batch_reply_to_single_prompt_yields_sentinel() {
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text(quizzes_json("batch", 2))]);
    let quiz = HistoryQuizGenerator::new(resolver).create_quiz(&reformation_case()).await;

    assert!(quiz.is_sentinel());
}

#[tokio::test]
async fn nested_fragment_is_not_recovered_from_mismatched_reply() {
    let reply = r#"{"question": "outer", "options": "oops", "hint": {"question": "inner", "options": []}}"#;
    let (resolver, _handle) = mock_resolver(vec![MockResponse::text(reply)]);
    let generation = MathQuizGenerator::new(resolver).generate_quiz(&MathTestCase::default()).await;

    assert!(generation.diagnostic().unwrap().contains("Response parse error"));
    assert!(generation.into_value().is_sentinel());
}

#[derive(Debug, Default)]
struct RecordingInterceptor {
    exchanges: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Interceptor for RecordingInterceptor {
    async fn save(&self, prompt: &str, response: &str) -> io::Result<()> {
        self.exchanges
            .lock()
            .unwrap()
            .push((prompt.to_string(), response.to_string()));
        Ok(())
    }
}

#[derive(Debug)]
struct BrokenDiskInterceptor;

#[async_trait]
impl Interceptor for BrokenDiskInterceptor {
    async fn save(&self, _prompt: &str, _response: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

#[tokio::test]
async fn interceptor_sees_every_exchange() {
    let (client, handle) = MockClient::with_responses(vec![
        MockResponse::text(REFORMATION_QUIZ_JSON),
        MockResponse::text("not a quiz"),
    ]);
    let recorder = Arc::new(RecordingInterceptor::default());
    let resolver = QuizResolver::new(client).with_interceptor(recorder.clone());
    let generator = HistoryQuizGenerator::new(resolver);

    let first = generator.create_quiz(&reformation_case()).await;
    let second = generator.create_quiz(&reformation_case()).await;

    assert_eq!(first, reformation_quiz());
    assert!(second.is_sentinel());

    let exchanges = recorder.exchanges.lock().unwrap().clone();
    assert_eq!(exchanges.len(), 2);
    assert_eq!(exchanges[0].0, handle.prompts()[0]);
    assert_eq!(exchanges[0].1, REFORMATION_QUIZ_JSON);
    assert_eq!(exchanges[1].1, "not a quiz");
}

#[tokio::test]
async fn failed_transcript_write_does_not_affect_generation() {
    let (client, _handle) = MockClient::with_responses(vec![MockResponse::text(REFORMATION_QUIZ_JSON)]);
    let resolver = QuizResolver::new(client).with_interceptor(Arc::new(BrokenDiskInterceptor));

    let quiz = HistoryQuizGenerator::new(resolver).create_quiz(&reformation_case()).await;

    assert_eq!(quiz, reformation_quiz());
}
