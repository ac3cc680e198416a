// Environment-driven backend selection.
//
// The `LLM_BACKEND` variable picks which provider the process talks to;
// each backend then reads its own endpoint/credential/model variables.

use crate::azure::AzureOpenAIClient;
use crate::openai::OpenAIClient;
use crate::traits::ChatClient;
use anyhow::{Context, Result};
use std::sync::Arc;

pub const BACKEND_VAR: &str = "LLM_BACKEND";

const GITHUB_MODELS_BASE: &str = "https://models.inference.ai.azure.com";
const OLLAMA_DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1";

/// Which chat backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Azure,
    Github,
    Ollama,
    OpenAI,
}

impl Backend {
    /// Read the backend selector from the environment.
    ///
    /// Defaults to `github` when unset. Unrecognized values fall through to
    /// plain OpenAI rather than erroring.
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_VAR) {
            Ok(value) => Self::parse(&value),
            Err(_) => Backend::Github,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "azure" => Backend::Azure,
            "github" => Backend::Github,
            "ollama" => Backend::Ollama,
            _ => Backend::OpenAI,
        }
    }
}

/// Fully resolved provider configuration: everything needed to construct a
/// client and address a model.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
        api_key: String,
    },
    Github {
        token: String,
        model: String,
    },
    Ollama {
        endpoint: String,
        model: String,
        api_key: String,
    },
    OpenAI {
        api_key: String,
        model: String,
    },
}

impl ProviderConfig {
    /// Resolve the configuration for the backend selected by `LLM_BACKEND`.
    pub fn from_env() -> Result<Self> {
        Self::for_backend(Backend::from_env())
    }

    /// Resolve the configuration for a specific backend.
    pub fn for_backend(backend: Backend) -> Result<Self> {
        match backend {
            Backend::Azure => Ok(Self::Azure {
                endpoint: require_env("AZURE_OPENAI_ENDPOINT")?,
                deployment: require_env("AZURE_OPENAI_CHAT_DEPLOYMENT")?,
                api_version: require_env("AZURE_OPENAI_VERSION")?,
                api_key: require_env("AZURE_OPENAI_API_KEY")?,
            }),
            Backend::Github => Ok(Self::Github {
                token: require_env("GITHUB_TOKEN")?,
                model: env_or("GITHUB_MODEL", "gpt-4o"),
            }),
            Backend::Ollama => Ok(Self::Ollama {
                endpoint: env_or("OLLAMA_ENDPOINT", OLLAMA_DEFAULT_ENDPOINT),
                model: env_or("OLLAMA_MODEL", "llama3.1"),
                api_key: env_or("OLLAMA_API_KEY", "none"),
            }),
            Backend::OpenAI => Ok(Self::OpenAI {
                api_key: require_env("OPENAI_API_KEY")?,
                model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            }),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            Self::Azure { .. } => Backend::Azure,
            Self::Github { .. } => Backend::Github,
            Self::Ollama { .. } => Backend::Ollama,
            Self::OpenAI { .. } => Backend::OpenAI,
        }
    }

    /// Model id (or Azure deployment name) requests should carry.
    pub fn model(&self) -> &str {
        match self {
            Self::Azure { deployment, .. } => deployment,
            Self::Github { model, .. }
            | Self::Ollama { model, .. }
            | Self::OpenAI { model, .. } => model,
        }
    }

    /// Construct the chat client this configuration describes.
    pub fn build_client(&self) -> Result<Arc<dyn ChatClient>> {
        match self {
            Self::Azure {
                endpoint,
                api_version,
                api_key,
                ..
            } => {
                let client = AzureOpenAIClient::builder()
                    .api_key(api_key.clone())
                    .endpoint(endpoint.clone())
                    .api_version(api_version.clone())
                    .build()?;
                Ok(Arc::new(client))
            }
            Self::Github { token, .. } => {
                let client = OpenAIClient::new(token.clone())?.with_base_url(GITHUB_MODELS_BASE);
                Ok(Arc::new(client))
            }
            Self::Ollama {
                endpoint, api_key, ..
            } => {
                let client = OpenAIClient::new(api_key.clone())?.with_base_url(endpoint.clone());
                Ok(Arc::new(client))
            }
            Self::OpenAI { api_key, .. } => Ok(Arc::new(OpenAIClient::new(api_key.clone())?)),
        }
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} environment variable is required", name))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parse_is_case_insensitive() {
        assert_eq!(Backend::parse("Azure"), Backend::Azure);
        assert_eq!(Backend::parse("GITHUB"), Backend::Github);
        assert_eq!(Backend::parse("ollama"), Backend::Ollama);
        assert_eq!(Backend::parse("openai"), Backend::OpenAI);
    }

    #[test]
    fn backend_parse_falls_through_to_openai() {
        assert_eq!(Backend::parse("anthropic"), Backend::OpenAI);
        assert_eq!(Backend::parse(""), Backend::OpenAI);
    }
}
