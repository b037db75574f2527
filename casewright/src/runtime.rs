//! Runtime wiring: provider, validated client and pipeline with observability.
//!
//! Both the client and the pipeline report to tracing and `metrics`. Install a
//! `metrics` recorder before building the runtime to collect the counters.

use std::sync::Arc;

use cwobserve::{SafePipelineHooks, SafeProviderHooks, standard_hooks};

use crate::config::AppConfig;
use crate::providers::{ProviderBuildConfig, build_provider_with_credentials};
use crate::{
    LlmClient, LlmClientConfig, MarkdownTableValidator, ModelProvider, Pipeline, PipelineError,
    ProviderError, ProviderId, SecureCredentialManager,
};

#[derive(Clone)]
pub struct RuntimeBundle {
    pub credentials: Arc<SecureCredentialManager>,
    pub client: Arc<LlmClient>,
    pub pipeline: Pipeline,
}

impl RuntimeBundle {
    pub fn provider_id(&self) -> ProviderId {
        self.client.provider_id()
    }

    /// Clears the stored key when `error` means the credential was rejected.
    /// Returns whether anything was cleared.
    pub fn handle_failure(&self, error: &PipelineError) -> bool {
        if !error.is_credential_error() {
            return false;
        }

        let provider = self.provider_id();
        match self.credentials.clear(provider) {
            Ok(cleared) => {
                tracing::warn!(
                    provider = %provider,
                    cleared,
                    "credential rejected; stored key cleared"
                );
                cleared
            }
            Err(clear_error) => {
                tracing::error!(
                    provider = %provider,
                    error = %clear_error,
                    "failed to clear credential"
                );
                false
            }
        }
    }
}

pub fn build_client(provider: Arc<dyn ModelProvider>, config: &AppConfig) -> LlmClient {
    let client_config = LlmClientConfig::new(config.model.clone())
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

    LlmClient::new(provider, client_config)
        .with_hooks(Arc::new(SafeProviderHooks::new(standard_hooks())))
}

/// `strict` enables the markdown table validator on every step.
pub fn build_pipeline(client: Arc<LlmClient>, strict: bool) -> Pipeline {
    let pipeline = Pipeline::new(client)
        .with_hooks(Arc::new(SafePipelineHooks::new(standard_hooks())));

    if strict {
        pipeline.with_validator(Arc::new(MarkdownTableValidator))
    } else {
        pipeline
    }
}

pub fn build_runtime(config: &AppConfig, strict: bool) -> Result<RuntimeBundle, ProviderError> {
    config.validate()?;
    let credentials = Arc::new(SecureCredentialManager::new());
    let provider = build_provider_with_credentials(
        ProviderBuildConfig::from(config),
        Arc::clone(&credentials),
    )?;
    Ok(build_runtime_with_provider(provider, credentials, config, strict))
}

pub fn build_runtime_with_provider(
    provider: Arc<dyn ModelProvider>,
    credentials: Arc<SecureCredentialManager>,
    config: &AppConfig,
    strict: bool,
) -> RuntimeBundle {
    let client = Arc::new(build_client(provider, config));
    let pipeline = build_pipeline(Arc::clone(&client), strict);

    RuntimeBundle {
        credentials,
        client,
        pipeline,
    }
}
