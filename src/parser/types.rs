use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of UI interaction performed by a step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Click,
    Input,
    /// Any action string we don't know how to replay. The executor skips these.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for StepAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepAction::Click => write!(f, "click"),
            StepAction::Input => write!(f, "input"),
            StepAction::Unknown => write!(f, "unknown"),
        }
    }
}

/// One atomic UI interaction against a locator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestStep {
    pub action: StepAction,

    /// CSS selector of the element to act on
    pub target: String,

    /// Text to type for `input` steps; empty for clicks
    #[serde(default)]
    pub value: String,
}

impl TestStep {
    pub fn click(target: &str) -> Self {
        Self {
            action: StepAction::Click,
            target: target.to_string(),
            value: String::new(),
        }
    }

    pub fn input(target: &str, value: impl Into<String>) -> Self {
        Self {
            action: StepAction::Input,
            target: target.to_string(),
            value: value.into(),
        }
    }

    /// Short human-readable form used in console output
    pub fn display(&self) -> String {
        match self.action {
            StepAction::Input => format!("input \"{}\" into {}", self.value, self.target),
            action => format!("{} {}", action, self.target),
        }
    }
}

/// Whether `name` can be used as a file name inside an artifacts directory
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// A named, ordered sequence of steps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub name: String,

    #[serde(default)]
    pub steps: Vec<TestStep>,
}
