use crate::parser::types::{TestCase, TestStep};

/// Default size of a generated plan
pub const DEFAULT_PLAN_SIZE: usize = 20;

/// Generates candidate test cases from a fixed step template
#[derive(Debug, Clone, Default)]
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    /// Produce `count` test cases named `Test-1`..`Test-{count}`.
    ///
    /// Every case clicks the start button, fills the input with its zero-based
    /// index and clicks submit. Output is identical for identical `count`.
    pub fn generate(&self, count: usize) -> Vec<TestCase> {
        (0..count)
            .map(|i| TestCase {
                name: format!("Test-{}", i + 1),
                steps: vec![
                    TestStep::click("#start_button"),
                    TestStep::input("#input_1", i.to_string()),
                    TestStep::click("#submit"),
                ],
            })
            .collect()
    }
}
