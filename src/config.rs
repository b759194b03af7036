use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::clients::azure::{AzureOpenAIClient, AzureOpenAIConfig, DEFAULT_API_VERSION};
use crate::clients::flexible::ClientType;

/// Trait for types that can retrieve their configuration key from environment variables
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key
    const KEY_NAME: &'static str;

    /// Find the API key by checking environment variables first, then .env file
    fn find_key() -> Option<String> {
        // First try to load .env file (silently fail if not found)
        let _ = dotenvy::dotenv();

        env::var(Self::KEY_NAME).ok().filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub azure: AzureOpenAIConfig,
    pub client: ClientType,
    pub transcript_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env` (if present) and read every setting from the environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    ///
    /// Cross-field checks are left to [`AppConfig::validate`] so callers can
    /// apply overrides first.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = AzureOpenAIConfig::default();

        let server = ServerConfig {
            host: parse_or(get("SERVER_HOST"), "SERVER_HOST", ServerConfig::default().host)?,
            port: parse_or(get("SERVER_PORT"), "SERVER_PORT", ServerConfig::default().port)?,
        };

        let azure = AzureOpenAIConfig {
            endpoint: get("LLM_MODEL_ENDPOINT").unwrap_or_default(),
            api_key: get(AzureOpenAIClient::KEY_NAME).unwrap_or_default(),
            deployment: get("LLM_MODEL_DEPLOYMENT").unwrap_or(defaults.deployment),
            api_version: get("LLM_MODEL_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            max_tokens: parse_or(get("LLM_MODEL_MAX_TOKENS"), "LLM_MODEL_MAX_TOKENS", defaults.max_tokens)?,
            temperature: parse_or(get("LLM_MODEL_TEMPERATURE"), "LLM_MODEL_TEMPERATURE", defaults.temperature)?,
        };

        let client = match get("QUIZ_CLIENT") {
            Some(value) => value
                .parse::<ClientType>()
                .map_err(anyhow::Error::msg)
                .context("Failed to parse QUIZ_CLIENT")?,
            None => ClientType::detect(&azure),
        };

        Ok(Self {
            server,
            azure,
            client,
            transcript_dir: get("QUIZ_TRANSCRIPT_DIR").map(PathBuf::from),
        })
    }

    /// Check cross-field requirements; rerun after applying CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if self.client == ClientType::Azure {
            if self.azure.endpoint.is_empty() {
                anyhow::bail!("LLM_MODEL_ENDPOINT must be set when using the azure client");
            }
            if self.azure.api_key.is_empty() {
                anyhow::bail!("{} must be set when using the azure client", AzureOpenAIClient::KEY_NAME);
            }
        }
        Ok(())
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw.parse::<T>().with_context(|| format!("Failed to parse {}", key)),
        None => Ok(default),
    }
}
