//! Fan-out that forwards every callback to two hook sets in order.
//!
//! ```rust
//! use cwobserve::{CombinedHooks, MetricsObservabilityHooks, TracingObservabilityHooks};
//! use cwprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = CombinedHooks::new(TracingObservabilityHooks, MetricsObservabilityHooks);
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use cwcommon::RunId;
use cwpipeline::{PipelineError, PipelineRuntimeHooks, PipelineStep, Route};
use cwprovider::{ProviderError, ProviderId, ProviderOperationHooks, StopReason, TokenUsage};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

/// Tracing events plus `metrics` counters. Metrics are recorded only when the
/// embedding application installs a recorder.
pub type StandardObservabilityHooks =
    CombinedHooks<TracingObservabilityHooks, MetricsObservabilityHooks>;

pub fn standard_hooks() -> StandardObservabilityHooks {
    CombinedHooks::new(TracingObservabilityHooks, MetricsObservabilityHooks)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedHooks<A, B> {
    first: A,
    second: B,
}

impl<A, B> CombinedHooks<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> ProviderOperationHooks for CombinedHooks<A, B>
where
    A: ProviderOperationHooks,
    B: ProviderOperationHooks,
{
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        self.first.on_call_start(provider, operation);
        self.second.on_call_start(provider, operation);
    }

    fn on_completion(
        &self,
        provider: ProviderId,
        operation: &str,
        stop_reason: StopReason,
        usage: TokenUsage,
    ) {
        self.first.on_completion(provider, operation, stop_reason, usage);
        self.second.on_completion(provider, operation, stop_reason, usage);
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        self.first.on_success(provider, operation, elapsed);
        self.second.on_success(provider, operation, elapsed);
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        self.first.on_failure(provider, operation, elapsed, error);
        self.second.on_failure(provider, operation, elapsed, error);
    }
}

impl<A, B> PipelineRuntimeHooks for CombinedHooks<A, B>
where
    A: PipelineRuntimeHooks,
    B: PipelineRuntimeHooks,
{
    fn on_run_start(&self, run_id: &RunId, route: Route) {
        self.first.on_run_start(run_id, route);
        self.second.on_run_start(run_id, route);
    }

    fn on_run_complete(&self, run_id: &RunId, route: Route, elapsed: Duration) {
        self.first.on_run_complete(run_id, route, elapsed);
        self.second.on_run_complete(run_id, route, elapsed);
    }

    fn on_run_failure(
        &self,
        run_id: &RunId,
        route: Route,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        self.first.on_run_failure(run_id, route, error, elapsed);
        self.second.on_run_failure(run_id, route, error, elapsed);
    }

    fn on_step_start(&self, run_id: &RunId, step: PipelineStep) {
        self.first.on_step_start(run_id, step);
        self.second.on_step_start(run_id, step);
    }

    fn on_step_success(&self, run_id: &RunId, step: PipelineStep, elapsed: Duration) {
        self.first.on_step_success(run_id, step, elapsed);
        self.second.on_step_success(run_id, step, elapsed);
    }

    fn on_step_failure(
        &self,
        run_id: &RunId,
        step: PipelineStep,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        self.first.on_step_failure(run_id, step, error, elapsed);
        self.second.on_step_failure(run_id, step, error, elapsed);
    }
}
