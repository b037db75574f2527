//! Application configuration resolved from CLI flags and the environment.
//!
//! Every flag has an environment fallback through clap. The API key also
//! falls back to the provider's conventional variable (`GROQ_API_KEY`,
//! `OPENAI_API_KEY`) when `--api-key`/`CASEWRIGHT_API_KEY` is absent.

use std::time::Duration;

use clap::Args;

use crate::providers::{api_key_env_var, default_model};
use crate::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, ProviderError, ProviderId};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// LLM provider: groq, openai or ollama
    #[arg(long, global = true, env = "CASEWRIGHT_PROVIDER")]
    pub provider: Option<String>,

    /// API key for the selected provider
    #[arg(long, global = true, env = "CASEWRIGHT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name; defaults to the provider's default model
    #[arg(long, global = true, env = "CASEWRIGHT_MODEL")]
    pub model: Option<String>,

    #[arg(long, global = true, env = "CASEWRIGHT_TEMPERATURE")]
    pub temperature: Option<f32>,

    #[arg(long, global = true, env = "CASEWRIGHT_MAX_TOKENS")]
    pub max_tokens: Option<u32>,

    /// Per-call timeout in seconds
    #[arg(long, global = true, env = "CASEWRIGHT_TIMEOUT_SECS", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Override the provider's chat-completions base URL
    #[arg(long, global = true, env = "CASEWRIGHT_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct AppConfig {
    pub provider: ProviderId,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub base_url: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AppConfig {
    /// Defaults for `provider`: its default model, temperature 0.2, 6000
    /// output tokens and a 60 second timeout.
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            api_key: None,
            model: default_model(provider).to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves parsed flags, consulting `env` only for the provider-specific
    /// API key variable.
    pub fn from_args(
        args: ConfigArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderError> {
        let provider = match args.provider.as_deref().map(str::trim) {
            None | Some("") => ProviderId::Groq,
            Some(value) => ProviderId::parse(value).ok_or_else(|| {
                ProviderError::invalid_request(format!(
                    "unknown provider '{value}'; expected groq, openai or ollama"
                ))
            })?,
        };

        let mut config = Self::new(provider);
        config.api_key = args
            .api_key
            .or_else(|| api_key_env_var(provider).and_then(&env))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(model) = args.model.filter(|model| !model.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(temperature) = args.temperature {
            config.temperature = temperature;
        }
        if let Some(max_tokens) = args.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            config.timeout = Duration::from_secs(timeout_secs);
        }
        config.base_url = args.base_url.filter(|url| !url.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ProviderError::invalid_request(
                "temperature must be between 0.0 and 2.0",
            ));
        }
        if self.max_tokens == 0 {
            return Err(ProviderError::invalid_request(
                "max_tokens must be greater than zero",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ProviderError::invalid_request(
                "timeout must be greater than zero",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ProviderError::invalid_request("model must not be empty"));
        }
        if self.provider.requires_api_key() && self.api_key.is_none() {
            let hint = api_key_env_var(self.provider).unwrap_or("CASEWRIGHT_API_KEY");
            return Err(ProviderError::authentication(format!(
                "no API key for {}; pass --api-key or set {hint}",
                self.provider
            )));
        }
        Ok(())
    }
}
