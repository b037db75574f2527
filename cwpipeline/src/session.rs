//! Caller-owned refinement context spanning several pipeline runs.
//!
//! ```rust,no_run
//! # async fn demo(pipeline: cwpipeline::Pipeline) -> Result<(), cwpipeline::PipelineError> {
//! use cwpipeline::RefinementSession;
//!
//! let mut session = RefinementSession::new(pipeline);
//! session.generate("As a user I can log in", "Lock after 5 failures").await?;
//! let refined = session.refine("Add a negative test for wrong password").await?;
//! println!("{refined}");
//! # Ok(())
//! # }
//! ```

use crate::{Pipeline, PipelineError, SessionState};

pub const GREETING: &str = "Hello! Please upload your PDF files to begin.";
pub const GENERATED_NOTICE: &str = "I have generated the initial test cases based on your documents. You can see them below. Feel free to ask me to make any changes or additions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub content: String,
}

impl TranscriptEntry {
    fn assistant(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
        }
    }
}

/// Holds the current table and conversation between runs. Each run gets a
/// fresh `SessionState`; only `final_tests` carries over.
#[derive(Debug)]
pub struct RefinementSession {
    pipeline: Pipeline,
    final_tests: Option<String>,
    transcript: Vec<TranscriptEntry>,
}

impl RefinementSession {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            final_tests: None,
            transcript: vec![TranscriptEntry::assistant(GREETING)],
        }
    }

    pub fn final_tests(&self) -> Option<&str> {
        self.final_tests.as_deref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Runs the full generation pipeline and replaces the stored table.
    pub async fn generate(
        &mut self,
        user_stories: impl Into<String>,
        specifications: impl Into<String>,
    ) -> Result<&str, PipelineError> {
        let mut state = SessionState::generate(user_stories, specifications);
        self.pipeline.run(&mut state).await?;

        self.transcript.push(TranscriptEntry::assistant(GENERATED_NOTICE));
        self.transcript.push(TranscriptEntry::assistant(state.final_tests.clone()));
        Ok(self.final_tests.insert(state.final_tests).as_str())
    }

    /// Revises the stored table according to `request`.
    ///
    /// Fails with `NotReady` until `generate` has succeeded once. On failure
    /// the stored table and transcript are left as they were.
    pub async fn refine(&mut self, request: impl Into<String>) -> Result<&str, PipelineError> {
        let Some(current) = self.final_tests.as_deref() else {
            return Err(PipelineError::not_ready(
                "generate the initial test cases before asking for refinements",
            ));
        };

        let request = request.into();
        let mut state = SessionState::refine(current, request.clone());
        self.pipeline.run(&mut state).await?;

        self.transcript.push(TranscriptEntry::user(request));
        self.transcript.push(TranscriptEntry::assistant(state.final_tests.clone()));
        Ok(self.final_tests.insert(state.final_tests).as_str())
    }
}
