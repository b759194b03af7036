use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

use crate::{core::LowLevelClient, error::AIError};

/// Mock client that always answers with an empty JSON object.
#[derive(Debug, Clone, Default)]
pub struct MockVoid;

#[async_trait]
impl LowLevelClient for MockVoid {
    async fn ask_raw(&self, _prompt: String) -> Result<String, AIError> {
        Ok("{}".to_string())
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Only served to prompts containing this text; `None` matches any prompt.
    pub when: Option<String>,
    pub reply: Result<String, String>,
    pub delay: Duration,
}

impl MockResponse {
    pub fn text(reply: impl Into<String>) -> Self {
        Self { when: None, reply: Ok(reply.into()), delay: Duration::ZERO }
    }

    /// A transport failure surfaced as `AIError::Mock`.
    pub fn error(message: impl Into<String>) -> Self {
        Self { when: None, reply: Err(message.into()), delay: Duration::ZERO }
    }

    pub fn when(mut self, needle: impl Into<String>) -> Self {
        self.when = Some(needle.into());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    responses: VecDeque<MockResponse>,
    prompts: Vec<String>,
}

/// Shared control surface for every clone of a `MockClient`.
#[derive(Debug, Default)]
pub struct MockHandle {
    state: Mutex<MockState>,
}

impl MockHandle {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        // a panicking test thread must not hide the recorded prompts
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push_all(&self, responses: impl IntoIterator<Item = MockResponse>) {
        self.lock().responses.extend(responses);
    }

    /// Prompts received so far, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    pub fn remaining(&self) -> usize {
        self.lock().responses.len()
    }

    fn take_for(&self, prompt: &str) -> Option<MockResponse> {
        let mut state = self.lock();
        state.prompts.push(prompt.to_string());
        let index = state.responses.iter().position(|r| {
            r.when.as_deref().map_or(true, |needle| prompt.contains(needle))
        })?;
        state.responses.remove(index)
    }
}

/// Scripted client: serves queued `MockResponse`s and records prompts.
#[derive(Debug, Clone)]
pub struct MockClient {
    handle: Arc<MockHandle>,
}

impl MockClient {
    pub fn new() -> (Self, Arc<MockHandle>) {
        let handle = Arc::new(MockHandle::default());
        (Self { handle: handle.clone() }, handle)
    }

    pub fn with_responses(responses: Vec<MockResponse>) -> (Self, Arc<MockHandle>) {
        let (client, handle) = Self::new();
        handle.push_all(responses);
        (client, handle)
    }
}

#[async_trait]
impl LowLevelClient for MockClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        let Some(response) = self.handle.take_for(&prompt) else {
            return Err(AIError::Mock("no scripted response for prompt".to_string()));
        };
        debug!(delay_ms = response.delay.as_millis() as u64, "Serving mock response");
        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }
        response.reply.map_err(AIError::Mock)
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
