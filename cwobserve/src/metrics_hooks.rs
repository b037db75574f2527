//! Metrics-based observability hooks for provider calls and pipeline steps.
//!
//! ```rust
//! use cwobserve::MetricsObservabilityHooks;
//! use cwprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use cwcommon::RunId;
use cwpipeline::{PipelineError, PipelineRuntimeHooks, PipelineStep, Route};
use cwprovider::{ProviderError, ProviderId, ProviderOperationHooks, StopReason, TokenUsage};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        metrics::counter!(
            "casewright_provider_call_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_completion(
        &self,
        provider: ProviderId,
        operation: &str,
        stop_reason: StopReason,
        usage: TokenUsage,
    ) {
        metrics::counter!(
            "casewright_provider_input_tokens_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(u64::from(usage.input_tokens));
        metrics::counter!(
            "casewright_provider_output_tokens_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(u64::from(usage.output_tokens));
        if stop_reason == StopReason::MaxTokens {
            metrics::counter!(
                "casewright_provider_truncated_total",
                "provider" => provider.to_string(),
                "operation" => operation.to_string()
            )
            .increment(1);
        }
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "casewright_provider_success_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "casewright_provider_call_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "casewright_provider_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "casewright_provider_call_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl PipelineRuntimeHooks for MetricsObservabilityHooks {
    fn on_run_start(&self, _run_id: &RunId, route: Route) {
        metrics::counter!("casewright_pipeline_run_start_total", "route" => route.to_string())
            .increment(1);
    }

    fn on_run_complete(&self, _run_id: &RunId, route: Route, elapsed: Duration) {
        metrics::counter!("casewright_pipeline_run_success_total", "route" => route.to_string())
            .increment(1);
        metrics::histogram!(
            "casewright_pipeline_run_duration_seconds",
            "route" => route.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_run_failure(
        &self,
        _run_id: &RunId,
        route: Route,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "casewright_pipeline_run_failure_total",
            "route" => route.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "casewright_pipeline_run_duration_seconds",
            "route" => route.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_step_start(&self, _run_id: &RunId, step: PipelineStep) {
        metrics::counter!("casewright_pipeline_step_start_total", "step" => step.name())
            .increment(1);
    }

    fn on_step_success(&self, _run_id: &RunId, step: PipelineStep, elapsed: Duration) {
        metrics::counter!("casewright_pipeline_step_success_total", "step" => step.name())
            .increment(1);
        metrics::histogram!(
            "casewright_pipeline_step_duration_seconds",
            "step" => step.name(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_step_failure(
        &self,
        _run_id: &RunId,
        step: PipelineStep,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "casewright_pipeline_step_failure_total",
            "step" => step.name(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "casewright_pipeline_step_duration_seconds",
            "step" => step.name(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
