use crate::parser::types::TestCase;

/// Default number of tests selected for execution
pub const DEFAULT_TOP_N: usize = 3;

/// Selects which planned tests get executed.
///
/// There is no scoring: selection keeps the planner's order.
#[derive(Debug, Clone, Default)]
pub struct Ranker;

impl Ranker {
    pub fn new() -> Self {
        Self
    }

    /// First `min(top_n, tests.len())` tests, in original order
    pub fn select(&self, mut tests: Vec<TestCase>, top_n: usize) -> Vec<TestCase> {
        tests.truncate(top_n);
        tests
    }
}
