use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use cwcommon::RunId;
use cwpipeline::{PipelineError, PipelineRuntimeHooks, PipelineStep, Route};
use cwprovider::{ProviderError, ProviderId, ProviderOperationHooks, StopReason, TokenUsage};

/// Isolates panics raised by the wrapped provider hooks.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_start(provider, operation)
        }));
    }

    fn on_completion(
        &self,
        provider: ProviderId,
        operation: &str,
        stop_reason: StopReason,
        usage: TokenUsage,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_completion(provider, operation, stop_reason, usage)
        }));
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(provider, operation, elapsed)
        }));
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(provider, operation, elapsed, error)
        }));
    }
}

/// Isolates panics raised by the wrapped pipeline hooks.
pub struct SafePipelineHooks<H> {
    inner: H,
}

impl<H> SafePipelineHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> PipelineRuntimeHooks for SafePipelineHooks<H>
where
    H: PipelineRuntimeHooks,
{
    fn on_run_start(&self, run_id: &RunId, route: Route) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_run_start(run_id, route)));
    }

    fn on_run_complete(&self, run_id: &RunId, route: Route, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_run_complete(run_id, route, elapsed)
        }));
    }

    fn on_run_failure(
        &self,
        run_id: &RunId,
        route: Route,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_run_failure(run_id, route, error, elapsed)
        }));
    }

    fn on_step_start(&self, run_id: &RunId, step: PipelineStep) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_step_start(run_id, step)));
    }

    fn on_step_success(&self, run_id: &RunId, step: PipelineStep, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_step_success(run_id, step, elapsed)
        }));
    }

    fn on_step_failure(
        &self,
        run_id: &RunId,
        step: PipelineStep,
        error: &PipelineError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_step_failure(run_id, step, error, elapsed)
        }));
    }
}
