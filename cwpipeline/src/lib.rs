//! Step pipeline that turns requirement documents into a traceable,
//! refinable markdown table of test cases.
//!
//! A run starts from a [`SessionState`] whose `step` selects one of two
//! fixed paths:
//!
//! - generate: `generate_user_tests` → `generate_spec_tests` → `merge_tests` → `add_traceability`
//! - refine: `refine_tests`
//!
//! ```rust
//! use cwpipeline::{PipelineStep, Route};
//!
//! let names = PipelineStep::plan(Route::Generate)
//!     .into_iter()
//!     .map(PipelineStep::name)
//!     .collect::<Vec<_>>();
//! assert_eq!(
//!     names,
//!     ["generate_user_tests", "generate_spec_tests", "merge_tests", "add_traceability"]
//! );
//! ```

mod error;
mod hooks;
pub mod markdown;
mod pipeline;
pub mod prompts;
mod session;
mod state;
mod step;
mod validator;

pub use error::{PipelineError, PipelineErrorKind};
pub use hooks::{NoopPipelineHooks, PipelineRuntimeHooks};
pub use pipeline::{Pipeline, PipelineBuilder, RunReport};
pub use session::{GENERATED_NOTICE, GREETING, RefinementSession, Speaker, TranscriptEntry};
pub use state::{Route, RunShape, SessionState, route};
pub use step::PipelineStep;
pub use validator::{
    ALLOWED_SOURCES, AcceptAllValidator, MarkdownTableValidator, OutputValidator, SOURCE_COLUMN,
};
