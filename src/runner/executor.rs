use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::events::{EventEmitter, TestEvent};
use crate::driver::{BrowserLauncher, BrowserSession};
use crate::parser::types::{is_plain_file_name, StepAction, TestCase};

/// Replays a test case in a fresh browser session
pub struct Executor {
    launcher: Arc<dyn BrowserLauncher>,
    target_url: String,
    screenshots_dir: PathBuf,
}

impl Executor {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        target_url: impl Into<String>,
        screenshots_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            launcher,
            target_url: target_url.into(),
            screenshots_dir: screenshots_dir.into(),
        }
    }

    /// Run every step of `test` and return the artifact paths.
    ///
    /// The session is closed on every path out of this function. A step
    /// failure wins over a close failure.
    pub async fn execute(&self, test: &TestCase, events: &EventEmitter) -> Result<Vec<String>> {
        if !is_plain_file_name(&test.name) {
            anyhow::bail!("Invalid test name {:?}: must be a plain file name", test.name);
        }

        let session = self
            .launcher
            .launch()
            .await
            .context("Failed to launch browser")?;

        let outcome = self.drive(session.as_ref(), test, events).await;
        let closed = session.close().await;

        match (outcome, closed) {
            (Ok(artifacts), Ok(())) => Ok(artifacts),
            (Ok(_), Err(e)) => Err(e.context("Failed to close browser")),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                log::warn!("{}: browser close failed after error: {:#}", test.name, close_err);
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        session: &dyn BrowserSession,
        test: &TestCase,
        events: &EventEmitter,
    ) -> Result<Vec<String>> {
        session.goto(&self.target_url).await?;

        for (index, step) in test.steps.iter().enumerate() {
            if step.action == StepAction::Unknown {
                events.emit(TestEvent::StepSkipped {
                    test: test.name.clone(),
                    index,
                    reason: "unsupported action".to_string(),
                });
                continue;
            }

            events.emit(TestEvent::StepStarted {
                test: test.name.clone(),
                index,
                step: step.display(),
            });

            let started = Instant::now();
            let result = match step.action {
                StepAction::Click => session.click(&step.target).await,
                StepAction::Input => {
                    session
                        .fill(&step.target, &step.value)
                        .await
                }
                StepAction::Unknown => Ok(()),
            };
            let duration_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(()) => events.emit(TestEvent::StepPassed {
                    test: test.name.clone(),
                    index,
                    duration_ms,
                }),
                Err(e) => {
                    events.emit(TestEvent::StepFailed {
                        test: test.name.clone(),
                        index,
                        error: format!("{:#}", e),
                        duration_ms,
                    });
                    return Err(e.context(format!("Step {} ({}) failed", index, step.display())));
                }
            }
        }

        let screenshot_path = self.screenshots_dir.join(format!("{}.png", test.name));
        session.screenshot(&screenshot_path).await?;

        let path = screenshot_path.display().to_string();
        events.emit(TestEvent::ScreenshotSaved {
            test: test.name.clone(),
            path: path.clone(),
        });

        Ok(vec![path])
    }
}
