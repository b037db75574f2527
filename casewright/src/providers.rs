//! Stable provider construction surface for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::{AppConfig, DEFAULT_TIMEOUT_SECS};
use crate::{ModelProvider, ProviderError, ProviderId, SecureCredentialManager};

#[derive(Clone)]
pub struct ProviderBuildConfig {
    pub provider_id: ProviderId,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderBuildConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderBuildConfig")
            .field("provider_id", &self.provider_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ProviderBuildConfig {
    pub fn new(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            base_url: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl From<&AppConfig> for ProviderBuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            provider_id: config.provider,
            api_key: config.api_key.clone(),
            timeout: config.timeout,
            base_url: config.base_url.clone(),
        }
    }
}

/// Conventional environment variable holding the key for `provider`.
pub fn api_key_env_var(provider: ProviderId) -> Option<&'static str> {
    match provider {
        ProviderId::Groq => Some("GROQ_API_KEY"),
        ProviderId::OpenAi => Some("OPENAI_API_KEY"),
        ProviderId::Ollama => None,
    }
}

pub fn default_model(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::Groq => "llama3-8b-8192",
        ProviderId::OpenAi => "gpt-4o-mini",
        ProviderId::Ollama => "llama3.2",
    }
}

pub fn build_provider_from_api_key(
    provider_id: ProviderId,
    api_key: impl Into<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    build_provider_with_config(ProviderBuildConfig::new(provider_id).with_api_key(api_key))
}

pub fn build_provider_with_config(
    config: ProviderBuildConfig,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    build_provider_with_credentials(config, Arc::new(SecureCredentialManager::new()))
}

/// Builds the adapter for `config.provider_id`, storing its key in
/// `credentials` so the caller can clear it after a rejection.
pub fn build_provider_with_credentials(
    config: ProviderBuildConfig,
    credentials: Arc<SecureCredentialManager>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let api_key = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    if config.provider_id.requires_api_key() && api_key.is_none() {
        return Err(ProviderError::authentication(
            "provider API key must not be empty",
        ));
    }

    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    match config.provider_id {
        ProviderId::Groq => build_groq_provider(credentials, api_key, http, config.base_url),
        ProviderId::OpenAi => build_openai_provider(credentials, api_key, http, config.base_url),
        ProviderId::Ollama => build_ollama_provider(http, config.base_url),
    }
}

#[cfg(feature = "provider-groq")]
fn build_groq_provider(
    credentials: Arc<SecureCredentialManager>,
    api_key: Option<String>,
    http: Client,
    base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use cwprovider::adapters::groq::GroqProvider;

    if let Some(api_key) = api_key {
        credentials.set_groq_api_key(api_key)?;
    }
    let mut transport = GroqProvider::default_http_transport(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(GroqProvider::new(credentials, Arc::new(transport))))
}

#[cfg(not(feature = "provider-groq"))]
fn build_groq_provider(
    _credentials: Arc<SecureCredentialManager>,
    _api_key: Option<String>,
    _http: Client,
    _base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-groq feature is not enabled on casewright",
    ))
}

#[cfg(feature = "provider-openai")]
fn build_openai_provider(
    credentials: Arc<SecureCredentialManager>,
    api_key: Option<String>,
    http: Client,
    base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use cwprovider::adapters::openai::{OpenAiHttpTransport, OpenAiProvider};

    if let Some(api_key) = api_key {
        credentials.set_openai_api_key(api_key)?;
    }
    let mut transport = OpenAiHttpTransport::new(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(OpenAiProvider::new(credentials, Arc::new(transport))))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_provider(
    _credentials: Arc<SecureCredentialManager>,
    _api_key: Option<String>,
    _http: Client,
    _base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on casewright",
    ))
}

#[cfg(feature = "provider-ollama")]
fn build_ollama_provider(
    http: Client,
    base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use cwprovider::adapters::ollama::OllamaProvider;

    let mut transport = OllamaProvider::default_http_transport(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(OllamaProvider::new(Arc::new(transport))))
}

#[cfg(not(feature = "provider-ollama"))]
fn build_ollama_provider(
    _http: Client,
    _base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-ollama feature is not enabled on casewright",
    ))
}

#[cfg(all(
    test,
    feature = "provider-groq",
    feature = "provider-openai",
    feature = "provider-ollama"
))]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn groq_build_stores_key_in_shared_manager() {
        let credentials = Arc::new(SecureCredentialManager::new());
        let provider = build_provider_with_credentials(
            ProviderBuildConfig::new(ProviderId::Groq).with_api_key("  gsk_live_1  "),
            Arc::clone(&credentials),
        )
        .expect("provider should build");

        assert_eq!(provider.id(), ProviderId::Groq);
        assert!(credentials.has_credentials(ProviderId::Groq).expect("lock"));
    }

    #[test]
    fn key_prefix_is_checked_per_provider() {
        let error = build_provider_from_api_key(ProviderId::Groq, "sk-openai-key")
            .err()
            .expect("groq rejects openai-style key");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);

        let provider = build_provider_from_api_key(ProviderId::OpenAi, "sk-openai-key")
            .expect("openai accepts its own key");
        assert_eq!(provider.id(), ProviderId::OpenAi);
    }

    #[test]
    fn empty_key_is_rejected_for_hosted_providers() {
        let error = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Groq).with_api_key("   "),
        )
        .err()
        .expect("blank key");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }

    #[test]
    fn ollama_builds_without_key() {
        let provider = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Ollama).with_base_url("http://gpu-box:11434/v1"),
        )
        .expect("ollama should build");
        assert_eq!(provider.id(), ProviderId::Ollama);
    }

    #[test]
    fn default_models_match_adapters() {
        assert_eq!(
            default_model(ProviderId::Groq),
            cwprovider::adapters::groq::GROQ_DEFAULT_MODEL
        );
        assert_eq!(
            default_model(ProviderId::OpenAi),
            cwprovider::adapters::openai::OPENAI_DEFAULT_MODEL
        );
        assert_eq!(
            default_model(ProviderId::Ollama),
            cwprovider::adapters::ollama::OLLAMA_DEFAULT_MODEL
        );
    }
}
