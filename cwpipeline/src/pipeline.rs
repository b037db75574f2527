use std::sync::Arc;
use std::time::{Duration, Instant};

use cwcommon::RunId;
use cwprovider::LlmClient;

use crate::{
    AcceptAllValidator, NoopPipelineHooks, OutputValidator, PipelineError, PipelineRuntimeHooks,
    PipelineStep, Route, SessionState, route,
};

pub struct PipelineBuilder {
    client: Option<Arc<LlmClient>>,
    hooks: Arc<dyn PipelineRuntimeHooks>,
    validator: Arc<dyn OutputValidator>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            hooks: Arc::new(NoopPipelineHooks),
            validator: Arc::new(AcceptAllValidator),
        }
    }

    pub fn client(mut self, client: Arc<LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn PipelineRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn validator(mut self, validator: Arc<dyn OutputValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let client = self
            .client
            .ok_or_else(|| PipelineError::not_ready("an LLM client is required to run steps"))?;

        Ok(Pipeline {
            client,
            hooks: self.hooks,
            validator: self.validator,
        })
    }
}

/// Outcome of a successful run. The produced table is in the caller's
/// `SessionState::final_tests`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: RunId,
    pub route: Route,
    pub visited: Vec<PipelineStep>,
    pub elapsed: Duration,
}

#[derive(Clone)]
pub struct Pipeline {
    client: Arc<LlmClient>,
    hooks: Arc<dyn PipelineRuntimeHooks>,
    validator: Arc<dyn OutputValidator>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self {
            client,
            hooks: Arc::new(NoopPipelineHooks),
            validator: Arc::new(AcceptAllValidator),
        }
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn PipelineRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn OutputValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn client(&self) -> &Arc<LlmClient> {
        &self.client
    }

    /// Runs every step planned for `state.step`.
    ///
    /// The client is validated before the first step. Steps execute against a
    /// copy of `state`; the copy replaces `state` only after the last step
    /// succeeds, so on any error the caller's state is untouched.
    pub async fn run(&self, state: &mut SessionState) -> Result<RunReport, PipelineError> {
        let run_id = RunId::generate();
        let route = route(state);
        let started_at = Instant::now();
        self.hooks.on_run_start(&run_id, route);

        match self.run_inner(&run_id, route, state).await {
            Ok((working, visited)) => {
                *state = working;
                let elapsed = started_at.elapsed();
                self.hooks.on_run_complete(&run_id, route, elapsed);
                Ok(RunReport {
                    run_id,
                    route,
                    visited,
                    elapsed,
                })
            }
            Err(error) => {
                self.hooks.on_run_failure(&run_id, route, &error, started_at.elapsed());
                Err(error)
            }
        }
    }

    async fn run_inner(
        &self,
        run_id: &RunId,
        route: Route,
        state: &SessionState,
    ) -> Result<(SessionState, Vec<PipelineStep>), PipelineError> {
        self.client
            .ensure_validated()
            .await
            .map_err(|error| PipelineError::credential(error.message))?;

        let mut working = state.clone();
        let mut visited = Vec::new();
        let mut next = Some(PipelineStep::entry(route));
        while let Some(step) = next {
            self.execute_step(run_id, step, &mut working).await?;
            visited.push(step);
            next = step.next();
        }

        Ok((working, visited))
    }

    async fn execute_step(
        &self,
        run_id: &RunId,
        step: PipelineStep,
        working: &mut SessionState,
    ) -> Result<(), PipelineError> {
        let started_at = Instant::now();
        self.hooks.on_step_start(run_id, step);

        let prompt = step.render_prompt(working);
        let result = match self.client.invoke(&prompt).await {
            Ok(output) => {
                let checked = self.validator.validate(step, &output).await;
                checked.map(|()| output)
            }
            Err(error) => Err(PipelineError::from(error).at_step(step)),
        };

        match result {
            Ok(output) => {
                step.apply(working, output);
                self.hooks.on_step_success(run_id, step, started_at.elapsed());
                Ok(())
            }
            Err(error) => {
                let error = if error.step.is_none() {
                    error.at_step(step)
                } else {
                    error
                };
                self.hooks.on_step_failure(run_id, step, &error, started_at.elapsed());
                Err(error)
            }
        }
    }
}
