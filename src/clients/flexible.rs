use crate::clients::azure::{AzureOpenAIClient, AzureOpenAIConfig};
use crate::clients::mock::MockVoid;
use crate::core::LowLevelClient;
use crate::error::AIError;
use async_trait::async_trait;
use std::str::FromStr;

/// Which model backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClientType {
    Azure,
    Mock,
}

impl ClientType {
    /// Azure when a credential is configured, otherwise the mock.
    pub fn detect(azure: &AzureOpenAIConfig) -> Self {
        if azure.api_key.is_empty() {
            Self::Mock
        } else {
            Self::Azure
        }
    }
}

impl FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "azure" => Ok(Self::Azure),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown client type: '{}'. Supported: azure, mock", s)),
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::Azure => write!(f, "azure"),
            ClientType::Mock => write!(f, "mock"),
        }
    }
}

/// Client that wraps any LowLevelClient behind one concrete type.
#[derive(Debug, Clone)]
pub struct FlexibleClient {
    kind: ClientType,
    inner: Box<dyn LowLevelClient>,
}

impl FlexibleClient {
    pub fn new(kind: ClientType, azure: AzureOpenAIConfig) -> Self {
        let inner: Box<dyn LowLevelClient> = match kind {
            ClientType::Azure => Box::new(AzureOpenAIClient::new(azure)),
            ClientType::Mock => Box::new(MockVoid),
        };
        Self { kind, inner }
    }

    /// Wrap an already-built client, e.g. a scripted mock in tests.
    pub fn wrap(kind: ClientType, client: Box<dyn LowLevelClient>) -> Self {
        Self { kind, inner: client }
    }

    pub fn kind(&self) -> ClientType {
        self.kind
    }
}

#[async_trait]
impl LowLevelClient for FlexibleClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        self.inner.ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
