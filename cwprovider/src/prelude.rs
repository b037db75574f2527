//! Common `cwprovider` imports for downstream crates.

pub use crate::{
    LlmClient, LlmClientConfig, Message, ModelProvider, ModelRequest, ModelResponse,
    NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    ProviderOperationHooks, Role, SecureCredentialManager, StopReason, TokenUsage,
};
pub use cwcommon::{BoxFuture, GenerationOptions};
