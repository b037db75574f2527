//! Provider-agnostic LLM client contracts and OpenAI-compatible adapters.
//!
//! ```rust
//! use cwprovider::{Message, ModelRequest, ProviderId, Role};
//!
//! let request = ModelRequest::new("llama3-8b-8192", vec![Message::new(Role::User, "hi")])
//!     .with_temperature(0.2)
//!     .with_max_tokens(6000);
//!
//! assert!(request.validate().is_ok());
//! assert_eq!(ProviderId::Groq.to_string(), "groq");
//! ```

mod client;
mod credentials;
mod error;
mod hooks;
mod model;
mod provider;

pub mod adapters;
pub mod prelude;

pub use client::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, LlmClient, LlmClientConfig, VALIDATION_PROMPT,
};
pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks, execute_observed};
pub use model::{Message, ModelRequest, ModelResponse, ProviderId, Role, StopReason, TokenUsage};
pub use provider::{ModelProvider, ProviderFuture};
