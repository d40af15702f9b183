use super::types::{is_plain_file_name, TestCase};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A saved plan: the list of test cases produced by a planning run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestPlan {
    #[serde(default)]
    pub tests: Vec<TestCase>,
}

/// Parse a YAML plan file
pub fn parse_plan_file(path: &Path) -> Result<TestPlan> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_plan_content(&content)
        .with_context(|| format!("Failed to parse plan: {}", path.display()))
}

/// Parse YAML content into a plan.
///
/// Accepts either a mapping with a `tests` key or a bare list of test cases.
/// Test names become artifact file names, so path-like names are rejected.
pub fn parse_plan_content(content: &str) -> Result<TestPlan> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;

    let plan = match value {
        serde_yaml::Value::Sequence(_) => {
            let tests: Vec<TestCase> = serde_yaml::from_value(value)?;
            TestPlan { tests }
        }
        serde_yaml::Value::Null => TestPlan { tests: Vec::new() },
        _ => serde_yaml::from_value(value)?,
    };

    if let Some(bad) = plan.tests.iter().find(|t| !is_plain_file_name(&t.name)) {
        anyhow::bail!("Invalid test name {:?}: must be a plain file name", bad.name);
    }

    Ok(plan)
}

/// Write a plan as YAML, creating parent directories as needed
pub fn write_plan_file(plan: &TestPlan, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let yaml = serde_yaml::to_string(plan)?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write plan: {}", path.display()))?;
    Ok(())
}
