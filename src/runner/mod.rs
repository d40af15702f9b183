pub mod analyzer;
pub mod events;
pub mod executor;

use anyhow::{Context, Result};
use std::time::Instant;

pub use analyzer::Analyzer;
pub use events::*;
pub use executor::Executor;

use crate::parser::types::TestCase;
use crate::report::{ReportStore, TestReport};

/// Coordinates execution: executor, then analyzer, then report persistence.
///
/// Test cases run strictly one after another. The first failure aborts the
/// batch; reports already written stay on disk.
pub struct Orchestrator {
    executor: Executor,
    analyzer: Analyzer,
    store: ReportStore,
    events: EventEmitter,
}

impl Orchestrator {
    pub fn new(executor: Executor, analyzer: Analyzer, store: ReportStore) -> Self {
        Self {
            executor,
            analyzer,
            store,
            events: EventEmitter::default(),
        }
    }

    /// Use `events` for progress instead of a private emitter
    pub fn with_events(mut self, events: EventEmitter) -> Self {
        self.events = events;
        self
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Execute, analyze and persist each test case in order
    pub async fn run_all(&self, tests: &[TestCase]) -> Result<Vec<TestReport>> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let run_started = Instant::now();

        self.events.emit(TestEvent::RunStarted {
            run_id: run_id.clone(),
            total: tests.len(),
        });

        let mut reports = Vec::with_capacity(tests.len());
        for test in tests {
            let report = match self.run_one(test).await {
                Ok(report) => report,
                Err(e) => {
                    self.events.emit(TestEvent::TestAborted {
                        name: test.name.clone(),
                        error: format!("{:#}", e),
                    });
                    return Err(e);
                }
            };
            reports.push(report);
        }

        self.events.emit(TestEvent::RunFinished {
            run_id,
            executed: reports.len(),
            duration_ms: run_started.elapsed().as_millis() as u64,
        });

        Ok(reports)
    }

    async fn run_one(&self, test: &TestCase) -> Result<TestReport> {
        let started = Instant::now();
        self.events.emit(TestEvent::TestStarted {
            name: test.name.clone(),
            step_count: test.steps.len(),
        });

        let artifacts = self
            .executor
            .execute(test, &self.events)
            .await
            .with_context(|| format!("Test case {} failed to execute", test.name))?;

        let report = self.analyzer.analyze(test, artifacts);
        self.store
            .save(&report)
            .with_context(|| format!("Failed to save report for {}", test.name))?;

        self.events.emit(TestEvent::TestFinished {
            name: test.name.clone(),
            verdict: report.verdict.clone(),
            duration_ms: started.elapsed().as_millis() as u64,
        });

        Ok(report)
    }
}
