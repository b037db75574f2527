use std::sync::{Arc, Mutex};
use std::time::Duration;

use cwcommon::RunId;
use cwpipeline::{PipelineError, PipelineRuntimeHooks, PipelineStep, Route};
use cwprovider::{ProviderError, ProviderId, ProviderOperationHooks, StopReason, TokenUsage};

use crate::{
    CombinedHooks, MetricsObservabilityHooks, SafePipelineHooks, SafeProviderHooks,
    TracingObservabilityHooks, standard_hooks,
};

fn exercise_provider_hooks(hooks: &dyn ProviderOperationHooks) {
    let error = ProviderError::timeout("provider timeout");
    let usage = TokenUsage {
        input_tokens: 900,
        output_tokens: 6000,
        total_tokens: 6900,
    };
    hooks.on_call_start(ProviderId::Groq, "validate");
    hooks.on_completion(ProviderId::Groq, "validate", StopReason::MaxTokens, usage);
    hooks.on_success(ProviderId::Groq, "validate", Duration::from_millis(10));
    hooks.on_call_start(ProviderId::Groq, "complete");
    hooks.on_failure(
        ProviderId::Groq,
        "complete",
        Duration::from_millis(60_000),
        &error,
    );
}

fn exercise_pipeline_hooks(hooks: &dyn PipelineRuntimeHooks) {
    let run_id = RunId::from("run-1");
    let error = PipelineError::provider("upstream overloaded").at_step(PipelineStep::MergeTests);

    hooks.on_run_start(&run_id, Route::Generate);
    hooks.on_step_start(&run_id, PipelineStep::GenerateUserTests);
    hooks.on_step_success(
        &run_id,
        PipelineStep::GenerateUserTests,
        Duration::from_millis(20),
    );
    hooks.on_step_failure(
        &run_id,
        PipelineStep::MergeTests,
        &error,
        Duration::from_millis(20),
    );
    hooks.on_run_failure(&run_id, Route::Generate, &error, Duration::from_millis(40));
    hooks.on_run_complete(&run_id, Route::Refine, Duration::from_millis(30));
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    exercise_provider_hooks(&TracingObservabilityHooks);
    exercise_pipeline_hooks(&TracingObservabilityHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    exercise_provider_hooks(&MetricsObservabilityHooks);
    exercise_pipeline_hooks(&MetricsObservabilityHooks);
}

#[test]
fn standard_hooks_smoke_test_all_callbacks() {
    exercise_provider_hooks(&standard_hooks());
    exercise_pipeline_hooks(&standard_hooks());
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    fn push(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl ProviderOperationHooks for RecordingHooks {
    fn on_call_start(&self, _provider: ProviderId, _operation: &str) {
        self.push("call_start");
    }

    fn on_completion(
        &self,
        _provider: ProviderId,
        _operation: &str,
        stop_reason: StopReason,
        _usage: TokenUsage,
    ) {
        self.push(if stop_reason == StopReason::MaxTokens {
            "truncated"
        } else {
            "completion"
        });
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {
        self.push("success");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        self.push("failure");
    }
}

impl PipelineRuntimeHooks for RecordingHooks {
    fn on_run_start(&self, _run_id: &RunId, _route: Route) {
        self.push("run_start");
    }

    fn on_run_complete(&self, _run_id: &RunId, _route: Route, _elapsed: Duration) {
        self.push("run_complete");
    }

    fn on_run_failure(
        &self,
        _run_id: &RunId,
        _route: Route,
        _error: &PipelineError,
        _elapsed: Duration,
    ) {
        self.push("run_failure");
    }

    fn on_step_start(&self, _run_id: &RunId, _step: PipelineStep) {
        self.push("step_start");
    }

    fn on_step_success(&self, _run_id: &RunId, _step: PipelineStep, _elapsed: Duration) {
        self.push("step_success");
    }

    fn on_step_failure(
        &self,
        _run_id: &RunId,
        _step: PipelineStep,
        _error: &PipelineError,
        _elapsed: Duration,
    ) {
        self.push("step_failure");
    }
}

struct PanicHooks;

impl ProviderOperationHooks for PanicHooks {
    fn on_call_start(&self, _provider: ProviderId, _operation: &str) {
        panic!("call_start panic");
    }

    fn on_completion(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _stop_reason: StopReason,
        _usage: TokenUsage,
    ) {
        panic!("completion panic");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {
        panic!("success panic");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        panic!("failure panic");
    }
}

impl PipelineRuntimeHooks for PanicHooks {
    fn on_run_start(&self, _run_id: &RunId, _route: Route) {
        panic!("run_start panic");
    }

    fn on_run_complete(&self, _run_id: &RunId, _route: Route, _elapsed: Duration) {
        panic!("run_complete panic");
    }

    fn on_run_failure(
        &self,
        _run_id: &RunId,
        _route: Route,
        _error: &PipelineError,
        _elapsed: Duration,
    ) {
        panic!("run_failure panic");
    }

    fn on_step_start(&self, _run_id: &RunId, _step: PipelineStep) {
        panic!("step_start panic");
    }

    fn on_step_success(&self, _run_id: &RunId, _step: PipelineStep, _elapsed: Duration) {
        panic!("step_success panic");
    }

    fn on_step_failure(
        &self,
        _run_id: &RunId,
        _step: PipelineStep,
        _error: &PipelineError,
        _elapsed: Duration,
    ) {
        panic!("step_failure panic");
    }
}

#[test]
fn safe_provider_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_provider_hooks(&SafeProviderHooks::new(inner));

    assert_eq!(
        *events.lock().expect("events lock"),
        vec!["call_start", "truncated", "success", "call_start", "failure"]
    );
}

#[test]
fn combined_hooks_forward_to_both_sides_in_order() {
    let first = RecordingHooks::default();
    let second = RecordingHooks::default();
    let first_events = Arc::clone(&first.events);
    let second_events = Arc::clone(&second.events);
    let combined = CombinedHooks::new(first, second);

    exercise_provider_hooks(&combined);
    exercise_pipeline_hooks(&combined);

    let first_events = first_events.lock().expect("events lock").clone();
    assert_eq!(first_events.len(), 11);
    assert_eq!(first_events, *second_events.lock().expect("events lock"));
}

#[test]
fn safe_pipeline_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_pipeline_hooks(&SafePipelineHooks::new(inner));

    assert_eq!(events.lock().expect("events lock").len(), 6);
}

#[test]
fn safe_provider_hooks_swallow_panics() {
    exercise_provider_hooks(&SafeProviderHooks::new(PanicHooks));
}

#[test]
fn safe_pipeline_hooks_swallow_panics() {
    exercise_pipeline_hooks(&SafePipelineHooks::new(PanicHooks));
}
