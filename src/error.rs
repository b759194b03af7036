use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Model invocation failed: {0}")]
    Model(#[from] AIError),
    #[error("Response parse error: {0}. Raw response: {1}")]
    ResponseParse(#[source] serde_json::Error, String),
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum AIError {
    #[error("Azure OpenAI API error: {0}")]
    AzureOpenAI(#[from] AzureOpenAIError),
    #[error("Mock client error: {0}")]
    Mock(String),
}

#[derive(Error, Debug)]
pub enum AzureOpenAIError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Authentication failed")]
    Authentication,
}
