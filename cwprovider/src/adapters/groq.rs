//! Groq provider over the OpenAI-compatible chat-completions transport.
//!
//! Groq exposes the same `/chat/completions` contract as OpenAI under its own
//! base URL, so this adapter only contributes key handling and defaults.

use std::sync::Arc;

use reqwest::Client;

use crate::adapters::openai::{
    OpenAiHttpTransport, OpenAiTransport, build_compat_request, resolve_api_key_auth,
};
use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama3-8b-8192";

impl SecureCredentialManager {
    /// Stores a Groq API key. Groq keys start with `gsk_`.
    pub fn set_groq_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.trim().starts_with("gsk_") {
            return Err(ProviderError::authentication(
                "Groq API key must start with 'gsk_'",
            ));
        }

        self.set_api_key(ProviderId::Groq, api_key)
    }
}

#[derive(Clone)]
pub struct GroqProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
}

impl GroqProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client).with_base_url(GROQ_BASE_URL)
    }
}

impl ModelProvider for GroqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_api_key_auth(&self.credentials, ProviderId::Groq)?;
            let response = self
                .transport
                .complete(build_compat_request(request), auth)
                .await?;
            Ok(response.into_model_response(ProviderId::Groq))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groq_key_requires_gsk_prefix() {
        let credentials = SecureCredentialManager::new();
        let error = credentials
            .set_groq_api_key("sk-not-groq")
            .expect_err("wrong prefix should be rejected");
        assert!(error.is_credential_error());
        assert!(!credentials.has_credentials(ProviderId::Groq).expect("lock"));

        credentials
            .set_groq_api_key("gsk_live_123")
            .expect("groq key should be accepted");
        assert!(credentials.has_credentials(ProviderId::Groq).expect("lock"));
    }

    #[test]
    fn default_transport_points_at_groq() {
        let transport = GroqProvider::default_http_transport(Client::new());
        assert_eq!(transport.base_url(), GROQ_BASE_URL);
    }
}
