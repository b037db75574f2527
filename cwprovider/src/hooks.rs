//! Operational hook contracts for single-attempt provider calls.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::{ProviderError, ProviderId, StopReason, TokenUsage};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_call_start(&self, _provider: ProviderId, _operation: &str) {}

    /// Called once a reply arrives, before `on_success`. `StopReason::MaxTokens`
    /// means the reply was cut off at the configured token limit.
    fn on_completion(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _stop_reason: StopReason,
        _usage: TokenUsage,
    ) {
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs one provider operation exactly once and reports its outcome to `hooks`.
pub async fn execute_observed<T, OpFuture>(
    provider: ProviderId,
    operation: &str,
    hooks: &dyn ProviderOperationHooks,
    execute: OpFuture,
) -> Result<T, ProviderError>
where
    OpFuture: Future<Output = Result<T, ProviderError>>,
{
    hooks.on_call_start(provider, operation);
    let started = Instant::now();

    match execute.await {
        Ok(value) => {
            hooks.on_success(provider, operation, started.elapsed());
            Ok(value)
        }
        Err(error) => {
            hooks.on_failure(provider, operation, started.elapsed(), &error);
            Err(error)
        }
    }
}
