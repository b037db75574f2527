//! Production-friendly observability hooks for provider calls and pipeline steps.
//!
//! ```rust
//! use cwobserve::{
//!     MetricsObservabilityHooks, SafePipelineHooks, SafeProviderHooks, TracingObservabilityHooks,
//! };
//!
//! let _provider_hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! let _pipeline_hooks = SafePipelineHooks::new(MetricsObservabilityHooks);
//! ```

mod combined_hooks;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use combined_hooks::{CombinedHooks, StandardObservabilityHooks, standard_hooks};
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafePipelineHooks, SafeProviderHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        CombinedHooks, MetricsObservabilityHooks, SafePipelineHooks, SafeProviderHooks,
        StandardObservabilityHooks, TracingObservabilityHooks, standard_hooks,
    };
}

#[cfg(test)]
mod tests;
