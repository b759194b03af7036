//! HTTP surface: JSON generation routes, the browser form and a health probe.

pub mod error;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::clients::flexible::FlexibleClient;
use crate::orchestrator::QuizService;

pub use error::{ApiError, ApiResult};

const FORM_PAGE: &str = include_str!("form.html");

#[derive(Clone, Debug)]
pub struct AppState {
    pub service: QuizService<FlexibleClient>,
}

impl AppState {
    pub fn new(service: QuizService<FlexibleClient>) -> Self {
        Self { service }
    }
}

pub fn create_router(state: AppState) -> Router {
    // Each generation route is served with and without the trailing slash.
    let generate = Router::new()
        .route("/history/", post(handlers::generate_history_quizzes))
        .route("/history", post(handlers::generate_history_quizzes))
        .route("/math/", post(handlers::generate_math_quiz))
        .route("/math", post(handlers::generate_math_quiz))
        .route("/quizzes/", post(handlers::generate_quizzes))
        .route("/quizzes", post(handlers::generate_quizzes));

    Router::new()
        .route("/", get(form_page))
        .route("/health", get(handlers::health_check))
        .nest("/generate", generate)
        .layer(from_fn(middleware::request_tracing))
        .with_state(state)
}

async fn form_page() -> Html<&'static str> {
    Html(FORM_PAGE)
}
