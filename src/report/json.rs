//! Flat-file report store: one pretty-printed JSON document per test case.

use std::path::PathBuf;
use thiserror::Error;

use super::types::TestReport;
use crate::parser::types::is_plain_file_name;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("report I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("report {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("report name {0:?} is not a plain file name")]
    InvalidName(String),
}

/// Reads and writes `<dir>/<test name>.json`
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a report, replacing any previous report with the same name
    pub fn save(&self, report: &TestReport) -> Result<PathBuf, StoreError> {
        let path = self
            .path_for(&report.test_case)
            .ok_or_else(|| StoreError::InvalidName(report.test_case.clone()))?;

        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(report).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;

        std::fs::write(&path, json).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        log::debug!("Report saved to: {}", path.display());
        Ok(path)
    }

    /// Load a report by test name. `None` when no such report exists.
    pub fn load(&self, name: &str) -> Result<Option<TestReport>, StoreError> {
        let Some(path) = self.path_for(name) else {
            return Ok(None);
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Names of all stored reports, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file()
                    && e.path().extension().map_or(false, |ext| ext == "json")
            })
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
            })
            .collect();

        names.sort();
        names
    }

    /// Load every stored report, in name order
    pub fn load_all(&self) -> Result<Vec<TestReport>, StoreError> {
        let mut reports = Vec::new();
        for name in self.list() {
            if let Some(report) = self.load(&name)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    // Only plain file names resolve; anything that could escape the directory does not
    fn path_for(&self, name: &str) -> Option<PathBuf> {
        is_plain_file_name(name).then(|| self.dir.join(format!("{}.json", name)))
    }
}
