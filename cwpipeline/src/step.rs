//! Named pipeline steps and the fixed transition table between them.

use std::fmt::{Display, Formatter};

use crate::{Route, SessionState, prompts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    GenerateUserTests,
    GenerateSpecTests,
    MergeTests,
    AddTraceability,
    RefineTests,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 5] = [
        Self::GenerateUserTests,
        Self::GenerateSpecTests,
        Self::MergeTests,
        Self::AddTraceability,
        Self::RefineTests,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::GenerateUserTests => "generate_user_tests",
            Self::GenerateSpecTests => "generate_spec_tests",
            Self::MergeTests => "merge_tests",
            Self::AddTraceability => "add_traceability",
            Self::RefineTests => "refine_tests",
        }
    }

    /// First step executed for `route`.
    pub fn entry(route: Route) -> Self {
        match route {
            Route::Generate => Self::GenerateUserTests,
            Route::Refine => Self::RefineTests,
        }
    }

    /// Successor of this step, or `None` when the run ends here.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::GenerateUserTests => Some(Self::GenerateSpecTests),
            Self::GenerateSpecTests => Some(Self::MergeTests),
            Self::MergeTests => Some(Self::AddTraceability),
            Self::AddTraceability | Self::RefineTests => None,
        }
    }

    /// Every step visited for `route`, in execution order.
    pub fn plan(route: Route) -> Vec<Self> {
        std::iter::successors(Some(Self::entry(route)), |step| step.next()).collect()
    }

    /// Whether the step's output is expected to carry a `Source` column.
    pub fn produces_traceability(self) -> bool {
        matches!(self, Self::AddTraceability | Self::RefineTests)
    }

    pub fn render_prompt(self, state: &SessionState) -> String {
        match self {
            Self::GenerateUserTests => prompts::user_story_tests(&state.user_stories),
            Self::GenerateSpecTests => prompts::spec_tests(&state.specifications),
            Self::MergeTests => prompts::merge_tests(
                &state.user_story_tests.join("\n"),
                &state.spec_tests.join("\n"),
            ),
            Self::AddTraceability => prompts::add_traceability(&state.merged_tests),
            Self::RefineTests => prompts::refine_tests(&state.final_tests, &state.user_request),
        }
    }

    /// Writes the model's reply into this step's output field.
    pub fn apply(self, state: &mut SessionState, output: String) {
        match self {
            Self::GenerateUserTests => state.user_story_tests = vec![output],
            Self::GenerateSpecTests => state.spec_tests = vec![output],
            Self::MergeTests => state.merged_tests = output,
            Self::AddTraceability | Self::RefineTests => state.final_tests = output,
        }
    }
}

impl Display for PipelineStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_plan_is_the_four_step_chain() {
        assert_eq!(
            PipelineStep::plan(Route::Generate),
            vec![
                PipelineStep::GenerateUserTests,
                PipelineStep::GenerateSpecTests,
                PipelineStep::MergeTests,
                PipelineStep::AddTraceability,
            ]
        );
    }

    #[test]
    fn refine_plan_is_a_single_step() {
        assert_eq!(
            PipelineStep::plan(Route::Refine),
            vec![PipelineStep::RefineTests]
        );
    }

    #[test]
    fn every_step_terminates_without_cycles() {
        for step in PipelineStep::ALL {
            let mut current = Some(step);
            let mut hops = 0;
            while let Some(next) = current {
                current = next.next();
                hops += 1;
                assert!(hops <= PipelineStep::ALL.len(), "{step} loops");
            }
        }
    }

    #[test]
    fn apply_writes_only_the_step_output_field() {
        let mut state = SessionState::generate("stories", "spec");

        PipelineStep::GenerateUserTests.apply(&mut state, "user table".to_string());
        PipelineStep::GenerateSpecTests.apply(&mut state, "spec table".to_string());
        assert_eq!(state.user_story_tests, vec!["user table".to_string()]);
        assert_eq!(state.spec_tests, vec!["spec table".to_string()]);
        assert!(state.merged_tests.is_empty());

        PipelineStep::MergeTests.apply(&mut state, "merged".to_string());
        assert_eq!(state.merged_tests, "merged");
        assert!(state.final_tests.is_empty());

        PipelineStep::AddTraceability.apply(&mut state, "final".to_string());
        assert_eq!(state.final_tests, "final");
        assert_eq!(state.user_stories, "stories");
    }

    #[test]
    fn merge_prompt_joins_each_list_with_newlines() {
        let mut state = SessionState::generate("", "");
        state.user_story_tests = vec!["| U1 |".to_string(), "| U2 |".to_string()];
        state.spec_tests = vec!["| S1 |".to_string()];

        let prompt = PipelineStep::MergeTests.render_prompt(&state);
        assert!(prompt.contains("| U1 |\n| U2 |"));
        assert!(prompt.contains("| S1 |"));
    }

    #[test]
    fn names_are_stable() {
        let names = PipelineStep::ALL.map(PipelineStep::name);
        assert_eq!(
            names,
            [
                "generate_user_tests",
                "generate_spec_tests",
                "merge_tests",
                "add_traceability",
                "refine_tests",
            ]
        );
    }
}
