//! Runtime hook contracts for observing pipeline runs and steps.
//!
//! ```rust
//! use cwpipeline::{NoopPipelineHooks, PipelineRuntimeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn PipelineRuntimeHooks) {}
//!
//! let hooks = NoopPipelineHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use cwcommon::RunId;

use crate::{PipelineError, PipelineStep, Route};

pub trait PipelineRuntimeHooks: Send + Sync {
    fn on_run_start(&self, _run_id: &RunId, _route: Route) {}

    fn on_run_complete(&self, _run_id: &RunId, _route: Route, _elapsed: Duration) {}

    fn on_run_failure(
        &self,
        _run_id: &RunId,
        _route: Route,
        _error: &PipelineError,
        _elapsed: Duration,
    ) {
    }

    fn on_step_start(&self, _run_id: &RunId, _step: PipelineStep) {}

    fn on_step_success(&self, _run_id: &RunId, _step: PipelineStep, _elapsed: Duration) {}

    fn on_step_failure(
        &self,
        _run_id: &RunId,
        _step: PipelineStep,
        _error: &PipelineError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPipelineHooks;

impl PipelineRuntimeHooks for NoopPipelineHooks {}
