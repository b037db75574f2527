//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};

use super::auth::resolve_api_key_auth;
use super::transport::OpenAiTransport;
use super::types::{OpenAiMessage, OpenAiRequest};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Clone)]
pub struct OpenAiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }
}

/// Maps a provider-agnostic request onto the chat-completions shape shared by
/// every OpenAI-compatible backend.
pub(crate) fn build_compat_request(request: ModelRequest) -> OpenAiRequest {
    OpenAiRequest {
        model: request.model,
        messages: request
            .messages
            .into_iter()
            .map(OpenAiMessage::from)
            .collect(),
        temperature: request.options.temperature,
        max_tokens: request.options.max_tokens,
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_api_key_auth(&self.credentials, ProviderId::OpenAi)?;
            let openai_request = build_compat_request(request);
            let response = self.transport.complete(openai_request, auth).await?;
            Ok(response.into_model_response(ProviderId::OpenAi))
        })
    }
}
