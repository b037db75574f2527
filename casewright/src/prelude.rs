//! Common imports for casewright applications.

pub use crate::{
    AppConfig, ChatExit, LlmClient, Pipeline, PipelineError, PipelineStep, ProviderError,
    ProviderId, RefinementSession, RunReport, RuntimeBundle, SessionState, build_runtime,
    extract_file, init_tracing, run_chat,
};
