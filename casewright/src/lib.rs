//! Facade over the casewright workspace crates.
//!
//! Re-exports the provider, pipeline, document and observability crates and
//! adds configuration, provider construction and the interactive chat loop.
//!
//! ```rust
//! use casewright::{AppConfig, ProviderId};
//!
//! let config = AppConfig::new(ProviderId::Groq).with_api_key("gsk_example");
//! assert_eq!(config.model, "llama3-8b-8192");
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod shell;

pub use cwcommon;
pub use cwdocs;
pub use cwobserve;
pub use cwpipeline;
pub use cwprovider;

pub use cwcommon::{BoxFuture, GenerationOptions, RunId};
pub use cwdocs::{ExtractError, ExtractErrorKind, extract_file, extract_text};
pub use cwobserve::{
    CombinedHooks, MetricsObservabilityHooks, SafePipelineHooks, SafeProviderHooks,
    StandardObservabilityHooks, TracingObservabilityHooks, standard_hooks,
};
pub use cwpipeline::{
    AcceptAllValidator, GENERATED_NOTICE, GREETING, MarkdownTableValidator, NoopPipelineHooks,
    OutputValidator, Pipeline, PipelineBuilder, PipelineError, PipelineErrorKind,
    PipelineRuntimeHooks, PipelineStep, RefinementSession, Route, RunReport, SessionState,
    Speaker, TranscriptEntry,
};
pub use cwprovider::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, LlmClient, LlmClientConfig, Message, ModelProvider,
    ModelRequest, ModelResponse, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    ProviderOperationHooks, Role, SecretString, SecureCredentialManager, StopReason, TokenUsage,
};

pub use config::{AppConfig, ConfigArgs, DEFAULT_TIMEOUT_SECS};
pub use providers::{
    ProviderBuildConfig, build_provider_from_api_key, build_provider_with_config,
    build_provider_with_credentials,
};
pub use runtime::{
    RuntimeBundle, build_client, build_pipeline, build_runtime, build_runtime_with_provider,
};
pub use shell::{ChatExit, run_chat};

/// Installs the fmt subscriber on stderr, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use crate::ProviderId;
    use crate::providers::default_model;

    #[test]
    fn facade_exposes_provider_defaults() {
        assert_eq!(default_model(ProviderId::Groq), "llama3-8b-8192");
        assert_eq!(default_model(ProviderId::OpenAi), "gpt-4o-mini");
    }

    #[test]
    fn init_tracing_is_idempotent() {
        crate::init_tracing();
        crate::init_tracing();
    }
}
