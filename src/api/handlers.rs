use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::ApiResult;
use super::AppState;
use crate::models::{HistoryTestCase, HistoryTestCases, MathTestCase};
use crate::orchestrator::CombinedQuizzes;
use crate::schema::Quiz;

pub const DEFAULT_NUM_QUIZZES: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryQuizzesResponse {
    pub quizzes: Vec<Quiz>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathQuizResponse {
    pub quiz: Quiz,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombinedRequest {
    pub history_test_case: HistoryTestCase,
    pub math_test_case: MathTestCase,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NumQuizzesQuery {
    #[serde(default = "default_num_quizzes")]
    pub num_quizzes: u32,
}

fn default_num_quizzes() -> u32 {
    DEFAULT_NUM_QUIZZES
}

pub async fn generate_history_quizzes(
    State(state): State<AppState>,
    payload: Result<Json<HistoryTestCases>, JsonRejection>,
) -> ApiResult<Json<HistoryQuizzesResponse>> {
    let Json(test_cases) = payload?;
    let quizzes = state.service.history_questions(test_cases.cases).await?;
    Ok(Json(HistoryQuizzesResponse { quizzes }))
}

pub async fn generate_math_quiz(
    State(state): State<AppState>,
    payload: Result<Json<MathTestCase>, JsonRejection>,
) -> ApiResult<Json<MathQuizResponse>> {
    let Json(test_case) = payload?;
    let quiz = state.service.math_question(test_case).await?;
    Ok(Json(MathQuizResponse { quiz }))
}

pub async fn generate_quizzes(
    State(state): State<AppState>,
    query: Result<Query<NumQuizzesQuery>, QueryRejection>,
    payload: Result<Json<CombinedRequest>, JsonRejection>,
) -> ApiResult<Json<CombinedQuizzes>> {
    let Query(NumQuizzesQuery { num_quizzes }) = query?;
    let Json(request) = payload?;
    let combined = state
        .service
        .generate_quizzes(request.history_test_case, request.math_test_case, num_quizzes)
        .await?;
    Ok(Json(combined))
}

pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "client": state.service.client().kind().to_string(),
    }))
}
