//! Tracing-based observability hooks for provider calls and pipeline steps.
//!
//! ```rust
//! use cwobserve::TracingObservabilityHooks;
//! use cwpipeline::PipelineRuntimeHooks;
//!
//! fn accepts_pipeline_hooks(_hooks: &dyn PipelineRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_pipeline_hooks(&hooks);
//! ```

use std::time::Duration;

use cwcommon::RunId;
use cwpipeline::{PipelineError, PipelineRuntimeHooks, PipelineStep, Route};
use cwprovider::{ProviderError, ProviderId, ProviderOperationHooks, StopReason, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        tracing::debug!(
            phase = "provider",
            event = "call_start",
            provider = %provider,
            operation
        );
    }

    fn on_completion(
        &self,
        provider: ProviderId,
        operation: &str,
        stop_reason: StopReason,
        usage: TokenUsage,
    ) {
        if stop_reason == StopReason::MaxTokens {
            tracing::warn!(
                phase = "provider",
                event = "truncated",
                provider = %provider,
                operation,
                output_tokens = usage.output_tokens,
                "reply hit the max token limit; the table may be incomplete"
            );
        } else {
            tracing::debug!(
                phase = "provider",
                event = "completion",
                provider = %provider,
                operation,
                stop_reason = ?stop_reason,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens
            );
        }
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl PipelineRuntimeHooks for TracingObservabilityHooks {
    fn on_run_start(&self, run_id: &RunId, route: Route) {
        tracing::info!(
            phase = "pipeline",
            event = "run_start",
            run_id = %run_id,
            route = %route
        );
    }

    fn on_run_complete(&self, run_id: &RunId, route: Route, elapsed: Duration) {
        tracing::info!(
            phase = "pipeline",
            event = "run_complete",
            run_id = %run_id,
            route = %route,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_run_failure(
        &self,
        run_id: &RunId,
        route: Route,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "pipeline",
            event = "run_failure",
            run_id = %run_id,
            route = %route,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_step_start(&self, run_id: &RunId, step: PipelineStep) {
        tracing::info!(
            phase = "pipeline",
            event = "step_start",
            run_id = %run_id,
            step = step.name()
        );
    }

    fn on_step_success(&self, run_id: &RunId, step: PipelineStep, elapsed: Duration) {
        tracing::info!(
            phase = "pipeline",
            event = "step_success",
            run_id = %run_id,
            step = step.name(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_step_failure(
        &self,
        run_id: &RunId,
        step: PipelineStep,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "pipeline",
            event = "step_failure",
            run_id = %run_id,
            step = step.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
