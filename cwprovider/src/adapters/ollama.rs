//! Ollama provider implemented over OpenAI-compatible transport.

use std::sync::Arc;

use reqwest::Client;

use crate::adapters::openai::{
    OpenAiAuth, OpenAiHttpTransport, OpenAiTransport, build_compat_request,
};
use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderErrorKind, ProviderFuture,
    ProviderId,
};

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.2";

/// Local Ollama server. Requests are sent without credentials.
#[derive(Clone)]
pub struct OllamaProvider {
    transport: Arc<dyn OpenAiTransport>,
}

impl OllamaProvider {
    pub fn new(transport: Arc<dyn OpenAiTransport>) -> Self {
        Self { transport }
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client).with_base_url(OLLAMA_BASE_URL)
    }
}

impl ModelProvider for OllamaProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Ollama
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let response = self
                .transport
                .complete(build_compat_request(request), OpenAiAuth::None)
                .await
                .map_err(|error| match error.kind {
                    ProviderErrorKind::Transport => ProviderError::unavailable(format!(
                        "ollama server not reachable at its configured base URL: {}",
                        error.message
                    )),
                    _ => error,
                })?;
            Ok(response.into_model_response(ProviderId::Ollama))
        })
    }
}
