use crate::config::KeyFromEnv;
use crate::core::LowLevelClient;
use crate::error::{AIError, AzureOpenAIError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_API_VERSION: &str = "2024-06-01";

/// Azure OpenAI chat-completions deployment settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AzureOpenAIConfig {
    pub endpoint: String,                 // e.g., https://my-azure.openai.azure.com
    pub api_key: String,                  // LLM_MODEL_API_KEY
    pub deployment: String,               // model deployment name
    pub api_version: String,              // e.g., 2024-06-01
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AzureOpenAIConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: "gpt-4o-mini".into(),
            api_version: DEFAULT_API_VERSION.into(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AzureOpenAIClient {
    config: AzureOpenAIConfig,
    http: reqwest::Client,
}

impl KeyFromEnv for AzureOpenAIClient {
    const KEY_NAME: &'static str = "LLM_MODEL_API_KEY";
}

impl AzureOpenAIClient {
    pub fn new(config: AzureOpenAIConfig) -> Self {
        info!(deployment = %config.deployment, api_version = %config.api_version, "Creating Azure OpenAI client");
        Self { config, http: reqwest::Client::new() }
    }

    pub fn config(&self) -> &AzureOpenAIConfig {
        &self.config
    }

    fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }

    fn body(&self, prompt: String) -> serde_json::Value {
        serde_json::json!({
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        })
    }
}

#[derive(Deserialize)]
struct Choices { choices: Vec<Choice> }
#[derive(Deserialize)]
struct Choice { message: Msg }
#[derive(Deserialize)]
struct Msg { content: Option<String> }

#[async_trait]
impl LowLevelClient for AzureOpenAIClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len(), deployment = %self.config.deployment))]
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        debug!("Sending request to Azure OpenAI");
        let resp = self.http
            .post(self.url())
            .header("api-key", &self.config.api_key)
            .json(&self.body(prompt))
            .send().await
            .map_err(|e| {
                error!(error = %e, "HTTP request failed");
                AzureOpenAIError::Http(e.to_string())
            })?;

        debug!(status = %resp.status(), "Received response from Azure OpenAI");

        if resp.status() == 401 {
            error!("Azure OpenAI authentication failed");
            return Err(AzureOpenAIError::Authentication.into());
        }
        if resp.status() == 429 {
            warn!("Azure OpenAI rate limit exceeded");
            return Err(AzureOpenAIError::RateLimit.into());
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let txt = resp.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %txt, "Azure OpenAI API error");
            return Err(AzureOpenAIError::Api(txt).into());
        }

        let parsed: Choices = resp.json().await
            .map_err(|e| AzureOpenAIError::Http(e.to_string()))?;
        let content = parsed.choices.into_iter().next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AzureOpenAIError::Api("No completion content in response".into()))?;

        info!(response_len = content.len(), "Received Azure OpenAI completion");
        Ok(content)
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> { Box::new(self.clone()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_targets_deployment_and_version() {
        let client = AzureOpenAIClient::new(AzureOpenAIConfig {
            endpoint: "https://example.openai.azure.com/".into(),
            deployment: "quiz-gpt".into(),
            api_version: "2024-02-01".into(),
            ..Default::default()
        });
        assert_eq!(
            client.url(),
            "https://example.openai.azure.com/openai/deployments/quiz-gpt/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn body_carries_prompt_as_single_user_message() {
        let client = AzureOpenAIClient::new(AzureOpenAIConfig::default());
        let body = client.body("hello".into());
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["max_tokens"], 2048);
    }
}
