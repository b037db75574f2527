mod auth;
mod provider;
mod serde_api;
mod transport;
mod types;

pub(crate) use auth::resolve_api_key_auth;
pub(crate) use provider::build_compat_request;

pub use provider::{OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL, OpenAiProvider};
pub use transport::{OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAuth, OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole,
    OpenAiUsage,
};
