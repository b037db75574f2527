//! Output checks applied to each step's reply before it is committed.

use cwcommon::BoxFuture;

use crate::markdown::{MarkdownTable, strip_emphasis};
use crate::{PipelineError, PipelineStep};

pub const SOURCE_COLUMN: &str = "Source";
pub const ALLOWED_SOURCES: [&str; 3] = ["User Story", "Specification", "Both"];

pub trait OutputValidator: Send + Sync {
    fn validate<'a>(
        &'a self,
        step: PipelineStep,
        output: &'a str,
    ) -> BoxFuture<'a, Result<(), PipelineError>>;
}

/// Treats every reply as opaque markdown.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllValidator;

impl OutputValidator for AcceptAllValidator {
    fn validate<'a>(
        &'a self,
        _step: PipelineStep,
        _output: &'a str,
    ) -> BoxFuture<'a, Result<(), PipelineError>> {
        Box::pin(async { Ok(()) })
    }
}

/// Requires a markdown table from every step, and a `Source` column with
/// known values from the traceability step. Refined tables keep the column
/// optional but any values present must still be known.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownTableValidator;

impl MarkdownTableValidator {
    pub fn check(step: PipelineStep, output: &str) -> Result<(), PipelineError> {
        let table = MarkdownTable::parse(output).ok_or_else(|| {
            PipelineError::content_format("reply does not contain a markdown table").at_step(step)
        })?;

        if !step.produces_traceability() {
            return Ok(());
        }

        let Some(sources) = table.column_values(SOURCE_COLUMN) else {
            if step == PipelineStep::AddTraceability {
                return Err(PipelineError::content_format(format!(
                    "table has no '{SOURCE_COLUMN}' column"
                ))
                .at_step(step));
            }
            return Ok(());
        };

        if let Some(unknown) = sources.into_iter().map(strip_emphasis).find(|value| {
            !ALLOWED_SOURCES
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(value))
        }) {
            return Err(PipelineError::content_format(format!(
                "unexpected {SOURCE_COLUMN} value '{unknown}'; expected one of {}",
                ALLOWED_SOURCES.join(", ")
            ))
            .at_step(step));
        }

        Ok(())
    }
}

impl OutputValidator for MarkdownTableValidator {
    fn validate<'a>(
        &'a self,
        step: PipelineStep,
        output: &'a str,
    ) -> BoxFuture<'a, Result<(), PipelineError>> {
        Box::pin(async move { Self::check(step, output) })
    }
}
