//! Session state carried through one pipeline run, plus entry routing.
//!
//! ```rust
//! use cwpipeline::{Route, RunShape, SessionState, route};
//!
//! let state = SessionState::refine("| ID | Description |", "add a logout case");
//! assert_eq!(state.step, RunShape::Refine);
//! assert_eq!(route(&state), Route::Refine);
//! ```

use std::fmt::{Display, Formatter};

/// Selects which run shape executes. Fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunShape {
    #[default]
    Generate,
    Refine,
}

impl RunShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Refine => "refine",
        }
    }
}

impl Display for RunShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub user_stories: String,
    pub specifications: String,
    pub user_story_tests: Vec<String>,
    pub spec_tests: Vec<String>,
    pub merged_tests: String,
    pub final_tests: String,
    pub user_request: String,
    pub step: RunShape,
}

impl SessionState {
    /// State for a full generation run. Empty documents are accepted.
    pub fn generate(user_stories: impl Into<String>, specifications: impl Into<String>) -> Self {
        Self {
            user_stories: user_stories.into(),
            specifications: specifications.into(),
            step: RunShape::Generate,
            ..Self::default()
        }
    }

    /// State for a single refinement of `final_tests` driven by `user_request`.
    pub fn refine(final_tests: impl Into<String>, user_request: impl Into<String>) -> Self {
        Self {
            final_tests: final_tests.into(),
            user_request: user_request.into(),
            step: RunShape::Refine,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Generate,
    Refine,
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generate => f.write_str("generate"),
            Self::Refine => f.write_str("refine"),
        }
    }
}

/// Entry routing decision. Reads nothing but `state.step`.
pub fn route(state: &SessionState) -> Route {
    match state.step {
        RunShape::Refine => Route::Refine,
        RunShape::Generate => Route::Generate,
    }
}
