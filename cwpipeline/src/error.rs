//! Pipeline-level error types and conversion helpers.
//!
//! ```rust
//! use cwpipeline::{PipelineError, PipelineErrorKind, PipelineStep};
//!
//! let err = PipelineError::content_format("no markdown table").at_step(PipelineStep::MergeTests);
//! assert_eq!(err.kind, PipelineErrorKind::ContentFormat);
//! assert!(err.to_string().contains("merge_tests"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use cwprovider::{ProviderError, ProviderErrorKind};

use crate::PipelineStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    /// Missing or rejected credential, or a failed validation call.
    Credential,
    Provider,
    Timeout,
    ContentFormat,
    NotReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    pub kind: PipelineErrorKind,
    pub step: Option<PipelineStep>,
    pub message: String,
}

impl PipelineError {
    pub fn new(kind: PipelineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            step: None,
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::Credential, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::Provider, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::Timeout, message)
    }

    pub fn content_format(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::ContentFormat, message)
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::new(PipelineErrorKind::NotReady, message)
    }

    pub fn at_step(mut self, step: PipelineStep) -> Self {
        self.step = Some(step);
        self
    }

    pub fn is_credential_error(&self) -> bool {
        self.kind == PipelineErrorKind::Credential
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.step {
            Some(step) => write!(f, "{:?} in {}: {}", self.kind, step, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for PipelineError {}

impl From<ProviderError> for PipelineError {
    fn from(value: ProviderError) -> Self {
        let kind = match value.kind {
            ProviderErrorKind::Authentication => PipelineErrorKind::Credential,
            ProviderErrorKind::Timeout => PipelineErrorKind::Timeout,
            _ => PipelineErrorKind::Provider,
        };
        Self::new(kind, value.to_string())
    }
}
