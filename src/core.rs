//! Core querying API: wraps a low-level model client with schema-aware
//! prompting and JSON reply parsing.
//!
//! - `LowLevelClient` is the seam to the hosted model (Azure, mock).
//! - `QuizResolver::resolve<T>()` renders a template with format instructions
//!   for `T`, sends it, and parses the reply into `T`.
//! - `Generation<T>` is the fail-soft result handed back by generators.

use crate::error::{AIError, QuizError};
use crate::interceptors::Interceptor;
use crate::json_utils::extract_first;
use crate::prompts::PromptKind;
use crate::schema::Sentinel;
use async_trait::async_trait;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Low-level model client abstraction.
///
/// Implementors provide `ask_raw`, which executes a prompt and returns the raw
/// model text. Parsing and schema handling is performed by `QuizResolver`.
#[async_trait]
pub trait LowLevelClient: Send + Sync + Debug {
    /// The only method that implementations must provide
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError>;

    /// Clone this client into a boxed trait object
    fn clone_box(&self) -> Box<dyn LowLevelClient>;
}

// Implement Clone for Box<dyn LowLevelClient>
impl Clone for Box<dyn LowLevelClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl LowLevelClient for Box<dyn LowLevelClient> {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        self.as_ref().ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        self.as_ref().clone_box()
    }
}

/// Outcome of one generation call: the parsed value, or the diagnostic of
/// whatever went wrong on the way.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation<T> {
    Generated(T),
    Failed { diagnostic: String },
}

impl<T> Generation<T> {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::Generated(_) => None,
            Self::Failed { diagnostic } => Some(diagnostic),
        }
    }
}

impl<T: Sentinel> Generation<T> {
    /// The generated value, or the sentinel placeholder on failure.
    pub fn into_value(self) -> T {
        match self {
            Self::Generated(value) => value,
            Self::Failed { .. } => T::sentinel(),
        }
    }
}

impl<T> From<Result<T, QuizError>> for Generation<T> {
    fn from(result: Result<T, QuizError>) -> Self {
        match result {
            Ok(value) => Self::Generated(value),
            Err(e) => Self::Failed { diagnostic: e.to_string() },
        }
    }
}

/// Text fragment telling the model which JSON shape to produce for `T`.
pub fn format_instructions<T: JsonSchema>() -> String {
    let schema = schema_for!(T);
    let schema_json = serde_json::to_string_pretty(&schema)
        .unwrap_or_else(|_| "Schema serialization failed".to_string());

    format!(
        "The output should be formatted as a JSON instance that conforms to the JSON schema below. \
Reply with the JSON instance only, not the schema itself.\n\
Here is the output schema:\n```json\n{}\n```",
        schema_json
    )
}

/// Parse a raw model reply into `T`.
///
/// The whole reply is tried first; failing that, the first top-level JSON
/// structure embedded in the text (e.g. inside a code fence) that deserializes
/// into `T` is used. Anything else is a `ResponseParse` failure.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Result<T, QuizError> {
    let trimmed = raw.trim();
    match serde_json::from_str::<T>(trimmed) {
        Ok(value) => Ok(value),
        Err(direct) => {
            debug!(error = %direct, "Reply is not bare JSON, scanning for embedded structures");
            extract_first::<T>(trimmed).ok_or_else(|| QuizError::ResponseParse(direct, raw.to_string()))
        }
    }
}

/// Resolver that wraps a LowLevelClient and turns prompt templates into typed replies.
#[derive(Clone, Debug)]
pub struct QuizResolver<C: LowLevelClient> {
    client: C,
    interceptor: Option<Arc<dyn Interceptor>>,
}

impl<C: LowLevelClient> QuizResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client, interceptor: None }
    }

    /// Record every prompt/reply pair through `interceptor`.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Render `kind` with `vars` plus format instructions for `T`, ask the
    /// model, and parse the reply.
    #[instrument(target = "quiz_forge::resolver", skip(self, vars), fields(kind = %kind))]
    pub async fn resolve<T>(&self, kind: PromptKind, vars: &[(&str, String)]) -> Result<T, QuizError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let mut vars = vars.to_vec();
        vars.push(("format_instructions", format_instructions::<T>()));
        let prompt = kind.template().render(&vars);
        info!(prompt_len = prompt.len(), "Sending quiz prompt");

        let raw = self.client.ask_raw(prompt.clone()).await?;
        debug!(response_len = raw.len(), "Received model reply");

        if let Some(interceptor) = &self.interceptor {
            if let Err(e) = interceptor.save(&prompt, &raw).await {
                warn!(error = %e, "Failed to record transcript");
            }
        }

        parse_reply::<T>(&raw)
    }
}
