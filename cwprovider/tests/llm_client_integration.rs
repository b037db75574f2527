#![cfg(feature = "provider-groq")]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cwprovider::adapters::groq::{GROQ_DEFAULT_MODEL, GroqProvider};
use cwprovider::adapters::openai::{
    OpenAiAuth, OpenAiFinishReason, OpenAiRequest, OpenAiResponse, OpenAiTransport, OpenAiUsage,
};
use cwprovider::{
    LlmClient, LlmClientConfig, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    SecureCredentialManager, VALIDATION_PROMPT,
};

#[derive(Debug, Default)]
struct QueueTransport {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl QueueTransport {
    fn with_replies(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

impl OpenAiTransport for QueueTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        _auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let prompt = request
                .messages
                .last()
                .map(|message| message.content.clone())
                .unwrap_or_default();
            self.prompts.lock().expect("prompts lock").push(prompt);

            let reply = self
                .replies
                .lock()
                .expect("replies lock")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::transport("no scripted reply")))?;

            Ok(OpenAiResponse {
                model: request.model,
                content: reply,
                finish_reason: OpenAiFinishReason::Stop,
                usage: OpenAiUsage::default(),
            })
        })
    }
}

fn groq_client(transport: Arc<QueueTransport>) -> LlmClient {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_groq_api_key("gsk_test_key")
        .expect("key should set");
    let provider = Arc::new(GroqProvider::new(credentials, transport));
    LlmClient::new(provider, LlmClientConfig::new(GROQ_DEFAULT_MODEL))
}

#[tokio::test]
async fn first_invoke_validates_then_sends_prompt() {
    let transport = Arc::new(QueueTransport::with_replies(vec![
        Ok("Hello!".to_string()),
        Ok("| TC-1 | login |".to_string()),
        Ok("| TC-2 | logout |".to_string()),
    ]));
    let client = groq_client(transport.clone());

    assert_eq!(client.provider_id(), ProviderId::Groq);
    assert!(!client.is_validated());

    let first = client.invoke("write tests").await.expect("first call");
    let second = client.invoke("more tests").await.expect("second call");

    assert_eq!(first, "| TC-1 | login |");
    assert_eq!(second, "| TC-2 | logout |");
    assert!(client.is_validated());
    assert_eq!(
        transport.prompts(),
        vec![
            VALIDATION_PROMPT.to_string(),
            "write tests".to_string(),
            "more tests".to_string(),
        ]
    );
}

#[tokio::test]
async fn rejected_key_surfaces_as_credential_error_and_skips_prompt() {
    let transport = Arc::new(QueueTransport::with_replies(vec![Err(
        ProviderError::authentication("Invalid API Key"),
    )]));
    let client = groq_client(transport.clone());

    let error = client
        .invoke("write tests")
        .await
        .expect_err("validation should fail");

    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert!(!client.is_validated());
    assert_eq!(transport.prompts(), vec![VALIDATION_PROMPT.to_string()]);
}
