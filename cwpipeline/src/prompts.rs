//! Fixed prompt templates, one per step role.
//!
//! Inputs are substituted verbatim; nothing is escaped or truncated.

pub fn user_story_tests(user_stories: &str) -> String {
    format!(
        "You are a meticulous QA engineer with a knack for identifying all possible scenarios and edge cases.

Generate detailed test cases based on the following user stories:

{user_stories}

Provide a comprehensive list of clear, structured test cases in a markdown table format,
covering all scenarios mentioned in the user stories.
"
    )
}

pub fn spec_tests(specifications: &str) -> String {
    format!(
        "You are a meticulous QA engineer with a knack for identifying all possible scenarios and edge cases.

Generate detailed test cases based on the following technical specifications:

{specifications}

Provide a comprehensive list of clear, structured test cases in a markdown table format,
covering all scenarios mentioned in the specifications.
"
    )
}

pub fn merge_tests(user_tests: &str, spec_tests: &str) -> String {
    format!(
        "You are an expert at synthesizing information. Your primary function is to ensure that
the final test suite is efficient and free of redundancy.

Merge the following two sets of test cases. Intelligently identify and remove duplicate
or overlapping test cases, and combine related ones.

User Story Test Cases:
{user_tests}

Specification Test Cases:
{spec_tests}

Provide a final, merged list of unique test cases in a single markdown table.
Ensure the table includes columns for Test Case ID, Description, Steps, and Expected Results.
"
    )
}

pub fn add_traceability(merged_tests: &str) -> String {
    format!(
        "You are a quality assurance auditor who ensures every requirement is tested.
You meticulously track the origin of each test case.

For each test case in the provided merged list, add a 'Source' column.
Based on the original requirements, determine if the test case originated from the
'User Story', the 'Specification', or was relevant to 'Both'.

Here is the merged list of test cases:
{merged_tests}

Provide the final list of merged test cases in a markdown table, with an additional
'Source' column populated with 'User Story', 'Specification', or 'Both' for each test case.
"
    )
}

pub fn refine_tests(final_tests: &str, user_request: &str) -> String {
    format!(
        "You are a senior QA lead who reviews test suites and perfects them based on feedback
from the development team and stakeholders. You understand user requests for changes
and implement them accurately.

Here is the original list of test cases:
---
{final_tests}
---

Here is the user's request for changes:
---
{user_request}
---

Your task is to update the original list of test cases according to the user's request.
You can add new test cases, delete irrelevant ones, or modify existing ones.
The final output must be the complete, updated list of test cases in the same markdown
table format as the original.
"
    )
}
