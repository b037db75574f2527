//! Validated prompt-in, text-out client used by every pipeline step.
//!
//! ```rust
//! use cwprovider::LlmClientConfig;
//!
//! let config = LlmClientConfig::new("llama3-8b-8192");
//! assert_eq!(config.options.temperature, Some(0.2));
//! assert_eq!(config.options.max_tokens, Some(6000));
//! ```

use std::sync::Arc;

use cwcommon::GenerationOptions;
use tokio::sync::OnceCell;

use crate::hooks::execute_observed;
use crate::{
    ModelProvider, ModelRequest, NoopOperationHooks, ProviderError, ProviderId,
    ProviderOperationHooks,
};

/// Trial prompt sent once before a client is trusted with real work.
pub const VALIDATION_PROMPT: &str = "Say Hello";

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 6000;

#[derive(Debug, Clone, PartialEq)]
pub struct LlmClientConfig {
    pub model: String,
    pub options: GenerationOptions,
}

impl LlmClientConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            options: GenerationOptions::default()
                .with_temperature(DEFAULT_TEMPERATURE)
                .with_max_tokens(DEFAULT_MAX_TOKENS),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options.max_tokens = Some(max_tokens);
        self
    }
}

pub struct LlmClient {
    provider: Arc<dyn ModelProvider>,
    config: LlmClientConfig,
    hooks: Arc<dyn ProviderOperationHooks>,
    validated: OnceCell<()>,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider.id())
            .field("config", &self.config)
            .field("validated", &self.is_validated())
            .finish()
    }
}

impl LlmClient {
    pub fn new(provider: Arc<dyn ModelProvider>, config: LlmClientConfig) -> Self {
        Self {
            provider,
            config,
            hooks: Arc::new(NoopOperationHooks),
            validated: OnceCell::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider.id()
    }

    pub fn config(&self) -> &LlmClientConfig {
        &self.config
    }

    pub fn is_validated(&self) -> bool {
        self.validated.initialized()
    }

    /// Performs the trial call once; later calls return immediately.
    ///
    /// Any failure of the trial call, an empty reply, or a reply that mentions
    /// an error is reported as an authentication error, and the client stays
    /// unvalidated so the next call tries again.
    pub async fn ensure_validated(&self) -> Result<(), ProviderError> {
        self.validated
            .get_or_try_init(|| self.validation_call())
            .await
            .map(|_| ())
    }

    /// Sends `prompt` as a single user message and returns the reply text verbatim.
    pub async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
        self.ensure_validated().await?;
        self.send("complete", prompt).await
    }

    async fn validation_call(&self) -> Result<(), ProviderError> {
        let reply = self
            .send("validate", VALIDATION_PROMPT)
            .await
            .map_err(|error| {
                ProviderError::authentication(format!(
                    "credential validation call failed: {}",
                    error.message
                ))
            })?;

        if reply.trim().is_empty() || reply.to_ascii_lowercase().contains("error") {
            return Err(ProviderError::authentication(
                "credential validation returned an empty or error response",
            ));
        }

        Ok(())
    }

    async fn send(&self, operation: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = ModelRequest::prompt(self.config.model.clone(), prompt)
            .with_options(self.config.options);
        let provider = self.provider.id();

        execute_observed(provider, operation, self.hooks.as_ref(), async {
            let response = self.provider.complete(request).await?;
            self.hooks.on_completion(provider, operation, response.stop_reason, response.usage);
            Ok(response.text)
        })
        .await
    }
}
