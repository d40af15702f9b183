use serde::{Deserialize, Serialize};

/// Outcome recorded for an executed test case
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestReport {
    /// Name of the test case this report belongs to
    pub test_case: String,
    pub verdict: String,
    /// Files produced while executing, e.g. the final screenshot
    pub artifacts: Vec<String>,
    pub reproducibility: u32,
    pub notes: String,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.verdict.eq_ignore_ascii_case("pass")
    }
}
