//! Application configuration, resolved once from the environment.

use std::env;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

use deep_agent_openai_model::{OpenAIConfig, OpenAIConfigBuilder};

const DEFAULT_API_KEY: &str = "sk-dummy";
const DEFAULT_MODEL: &str = "gpt-4o";
const OPENAI_PROVIDER_PREFIX: &str = "openai:";
/// Providers that `provider:model` strings may name but that this
/// application can't talk to.
const OTHER_PROVIDERS: &[&str] = &[
    "anthropic",
    "azure_openai",
    "bedrock",
    "cohere",
    "fireworks",
    "google_genai",
    "google_vertexai",
    "groq",
    "huggingface",
    "mistralai",
    "together",
];

/// Errors that can occur while resolving [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `OPENAI_MODEL` names a provider other than OpenAI while no custom
    /// endpoint is configured.
    UnsupportedProvider(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedProvider(provider) => write!(
                f,
                "unsupported model provider `{provider}`, only `openai` is available"
            ),
        }
    }
}

impl StdError for ConfigError {}

/// Everything the application reads from the environment.
///
/// | Variable          | Meaning                                   |
/// |-------------------|-------------------------------------------|
/// | `OPENAI_API_KEY`  | API key, `sk-dummy` if unset              |
/// | `OPENAI_API_BASE` | Custom OpenAI-compatible endpoint         |
/// | `OPENAI_MODEL`    | Model name, optionally `openai:`-prefixed |
/// | `OPENAI_MINIMAL`  | `1`, `true` or `yes` for minimal mode     |
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// The API key sent as bearer token.
    pub api_key: String,
    /// The custom endpoint, `None` for the official API.
    pub base_url: Option<String>,
    /// The model name, without provider prefix.
    pub model_name: String,
    /// Whether the agent runs without tools and with a short prompt.
    pub minimal: bool,
}

impl AppConfig {
    /// Resolves the configuration from the process environment.
    ///
    /// Call [`dotenvy::dotenv`] first if variables from `.env` should be
    /// taken into account.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_empty("OPENAI_API_KEY").unwrap_or_else(|| {
            warn!("OPENAI_API_KEY is not set, requests will be rejected");
            DEFAULT_API_KEY.to_owned()
        });
        let base_url = non_empty("OPENAI_API_BASE");
        let model_name = match non_empty("OPENAI_MODEL") {
            Some(model) => {
                strip_provider(&model, base_url.is_some())?.to_owned()
            }
            None => DEFAULT_MODEL.to_owned(),
        };

        Ok(Self {
            api_key,
            base_url,
            model_name,
            minimal: lookup("OPENAI_MINIMAL").is_some_and(|v| is_truthy(&v)),
        })
    }

    /// Returns the configuration of the OpenAI provider.
    pub fn openai_config(&self) -> OpenAIConfig {
        let mut builder = OpenAIConfigBuilder::with_api_key(&self.api_key)
            .with_model(&self.model_name);
        if let Some(base_url) = &self.base_url {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }
}

impl Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .field("minimal", &self.minimal)
            .finish()
    }
}

/// Accepts both `gpt-4o` and `openai:gpt-4o`. Other colons are part of
/// the model name (`qwen2.5:7b`), unless the official API is used and the
/// prefix names a known provider.
fn strip_provider(
    model: &str,
    custom_endpoint: bool,
) -> Result<&str, ConfigError> {
    let prefix_len = OPENAI_PROVIDER_PREFIX.len();
    if model.len() > prefix_len
        && model.is_char_boundary(prefix_len)
        && model[..prefix_len].eq_ignore_ascii_case(OPENAI_PROVIDER_PREFIX)
    {
        return Ok(&model[prefix_len..]);
    }
    if !custom_endpoint {
        if let Some((provider, _)) = model.split_once(':') {
            if OTHER_PROVIDERS
                .iter()
                .any(|other| provider.eq_ignore_ascii_case(other))
            {
                return Err(ConfigError::UnsupportedProvider(
                    provider.to_owned(),
                ));
            }
        }
    }
    Ok(model)
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["1", "true", "yes"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config.api_key, "sk-dummy");
        assert_eq!(config.base_url, None);
        assert_eq!(config.model_name, "gpt-4o");
        assert!(!config.minimal);

        let openai = config.openai_config();
        assert_eq!(openai.model(), "gpt-4o");
        assert_eq!(openai.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn test_custom_endpoint() {
        let config = resolve(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_API_BASE", "https://llm.example.com/v1/"),
            ("OPENAI_MODEL", "qwen3"),
        ])
        .unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model_name, "qwen3");

        let openai = config.openai_config();
        assert_eq!(openai.base_url(), "https://llm.example.com/v1");
        assert!(!format!("{config:?}").contains("sk-test"));
    }

    #[test]
    fn test_model_prefix() {
        let config = resolve(&[("OPENAI_MODEL", "openai:gpt-4o-mini")]).unwrap();
        assert_eq!(config.model_name, "gpt-4o-mini");

        let err = resolve(&[("OPENAI_MODEL", "anthropic:some-model")])
            .unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedProvider("anthropic".into()));
    }

    #[test]
    fn test_tagged_model_names() {
        let config = resolve(&[
            ("OPENAI_API_BASE", "http://localhost:11434/v1"),
            ("OPENAI_MODEL", "qwen2.5:7b"),
        ])
        .unwrap();
        assert_eq!(config.model_name, "qwen2.5:7b");
        assert_eq!(config.openai_config().model(), "qwen2.5:7b");

        let config = resolve(&[("OPENAI_MODEL", "llama3.1:8b")]).unwrap();
        assert_eq!(config.model_name, "llama3.1:8b");

        // Custom endpoints route names however they like.
        let config = resolve(&[
            ("OPENAI_API_BASE", "https://llm.example.com/v1"),
            ("OPENAI_MODEL", "anthropic:some-model"),
        ])
        .unwrap();
        assert_eq!(config.model_name, "anthropic:some-model");

        let config = resolve(&[
            ("OPENAI_API_BASE", "https://llm.example.com/v1"),
            ("OPENAI_MODEL", "OpenAI:gpt-4o"),
        ])
        .unwrap();
        assert_eq!(config.model_name, "gpt-4o");
    }

    #[test]
    fn test_minimal_flag() {
        for value in ["1", "true", "TRUE", " yes ", "Yes"] {
            let config = resolve(&[("OPENAI_MINIMAL", value)]).unwrap();
            assert!(config.minimal, "{value:?} should enable minimal mode");
        }
        for value in ["", "0", "false", "no", "on"] {
            let config = resolve(&[("OPENAI_MINIMAL", value)]).unwrap();
            assert!(!config.minimal, "{value:?} should not enable minimal mode");
        }
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config =
            resolve(&[("OPENAI_API_KEY", "  "), ("OPENAI_API_BASE", "")])
                .unwrap();
        assert_eq!(config.api_key, "sk-dummy");
        assert_eq!(config.base_url, None);
    }
}
