use tokio::sync::broadcast;

/// Execution events for real-time progress
#[derive(Debug, Clone, PartialEq)]
pub enum TestEvent {
    // Run events
    RunStarted {
        run_id: String,
        total: usize,
    },
    RunFinished {
        run_id: String,
        executed: usize,
        duration_ms: u64,
    },

    // Test case events
    TestStarted {
        name: String,
        step_count: usize,
    },
    TestFinished {
        name: String,
        verdict: String,
        duration_ms: u64,
    },
    TestAborted {
        name: String,
        error: String,
    },

    // Step events
    StepStarted {
        test: String,
        index: usize,
        step: String,
    },
    StepPassed {
        test: String,
        index: usize,
        duration_ms: u64,
    },
    StepFailed {
        test: String,
        index: usize,
        error: String,
        duration_ms: u64,
    },
    StepSkipped {
        test: String,
        index: usize,
        reason: String,
    },

    ScreenshotSaved {
        test: String,
        path: String,
    },
}

/// Event emitter for broadcasting run events
#[derive(Clone)]
pub struct EventEmitter {
    sender: broadcast::Sender<TestEvent>,
}

impl EventEmitter {
    pub fn new() -> (Self, broadcast::Receiver<TestEvent>) {
        let (sender, receiver) = broadcast::channel(100);
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: TestEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TestEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }
}

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration as StdDuration;

/// Console event listener for printing real-time updates
pub struct ConsoleEventListener;

impl ConsoleEventListener {
    /// Print events until the emitter is dropped
    pub async fn listen(mut receiver: broadcast::Receiver<TestEvent>) {
        use colored::Colorize;
        use indicatif::ProgressDrawTarget;
        use std::io::IsTerminal;

        // No escape codes when piped
        let multi = if std::io::stdout().is_terminal() {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let mut spinner: Option<ProgressBar> = None;
        let mut step_text = String::new();

        loop {
            let event = match receiver.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            };

            match event {
                TestEvent::RunStarted { run_id, total } => {
                    println!(
                        "\n{} Run {} started ({} tests)",
                        "▶".green().bold(),
                        run_id.cyan(),
                        total
                    );
                }

                TestEvent::RunFinished {
                    executed,
                    duration_ms,
                    ..
                } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish();
                    }
                    println!("\n{} Run finished", "■".blue().bold());
                    println!("  Executed: {}", executed.to_string().green());
                    println!("  Duration: {}ms", duration_ms);
                }

                TestEvent::TestStarted { name, step_count } => {
                    println!(
                        "\n  {} {} ({} steps)",
                        "→".blue(),
                        name.white().bold(),
                        step_count
                    );
                }

                TestEvent::TestFinished {
                    name,
                    verdict,
                    duration_ms,
                } => {
                    let verdict_str = if verdict.eq_ignore_ascii_case("pass") {
                        verdict.to_uppercase().green().bold()
                    } else {
                        verdict.to_uppercase().red().bold()
                    };
                    println!(
                        "  {} {} [{}] {}ms",
                        "←".blue(),
                        name,
                        verdict_str,
                        duration_ms
                    );
                }

                TestEvent::TestAborted { name, error } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish();
                    }
                    println!("  {} {} aborted: {}", "✗".red(), name, error.red());
                }

                TestEvent::StepStarted { index, step, .. } => {
                    let pb = multi.add(ProgressBar::new_spinner());
                    if let Ok(style) = ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .template("    {spinner} {msg}")
                    {
                        pb.set_style(style);
                    }

                    step_text = format!("[{}] {}... ", index, step.dimmed());
                    pb.set_message(step_text.clone());
                    pb.enable_steady_tick(StdDuration::from_millis(100));
                    spinner = Some(pb);
                }

                TestEvent::StepPassed { duration_ms, .. } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("    {} {}({}ms)", "✓".green(), step_text, duration_ms);
                }

                TestEvent::StepFailed {
                    error, duration_ms, ..
                } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("    {} {}({}ms)", "✗".red(), step_text, duration_ms);
                    println!("      {}", error.red());
                }

                TestEvent::StepSkipped { reason, .. } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    println!("    {} {}({})", "○".yellow(), step_text, reason.dimmed());
                }

                TestEvent::ScreenshotSaved { path, .. } => {
                    println!("    📸 {}", path.cyan());
                }
            }
        }
    }
}

/// Forwards events to the `log` facade; used by the HTTP server
pub struct LogEventListener;

impl LogEventListener {
    pub async fn listen(mut receiver: broadcast::Receiver<TestEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => log_event(&event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    log::warn!("Event log lagging, {} events dropped", missed);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}

fn log_event(event: &TestEvent) {
    match event {
        TestEvent::RunStarted { run_id, total } => {
            log::info!("run {} started: {} tests", run_id, total)
        }
        TestEvent::RunFinished {
            run_id,
            executed,
            duration_ms,
        } => log::info!(
            "run {} finished: {} executed in {}ms",
            run_id,
            executed,
            duration_ms
        ),
        TestEvent::TestStarted { name, step_count } => {
            log::info!("{}: started ({} steps)", name, step_count)
        }
        TestEvent::TestFinished {
            name,
            verdict,
            duration_ms,
        } => log::info!("{}: {} in {}ms", name, verdict, duration_ms),
        TestEvent::TestAborted { name, error } => log::error!("{}: aborted: {}", name, error),
        TestEvent::StepStarted { test, index, step } => {
            log::debug!("{} [{}] {}", test, index, step)
        }
        TestEvent::StepPassed {
            test,
            index,
            duration_ms,
        } => log::debug!("{} [{}] ok ({}ms)", test, index, duration_ms),
        TestEvent::StepFailed {
            test, index, error, ..
        } => log::warn!("{} [{}] failed: {}", test, index, error),
        TestEvent::StepSkipped {
            test,
            index,
            reason,
        } => log::debug!("{} [{}] skipped: {}", test, index, reason),
        TestEvent::ScreenshotSaved { test, path } => {
            log::debug!("{}: screenshot {}", test, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let (emitter, mut first) = EventEmitter::new();
        let mut second = emitter.subscribe();

        emitter.emit(TestEvent::TestStarted {
            name: "Test-1".to_string(),
            step_count: 3,
        });

        let expected = TestEvent::TestStarted {
            name: "Test-1".to_string(),
            step_count: 3,
        };
        assert_eq!(first.recv().await.unwrap(), expected);
        assert_eq!(second.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let emitter = EventEmitter::default();
        emitter.emit(TestEvent::RunStarted {
            run_id: "r".to_string(),
            total: 0,
        });
    }

    #[tokio::test]
    async fn test_log_listener_stops_when_emitter_dropped() {
        let (emitter, receiver) = EventEmitter::new();
        let handle = tokio::spawn(LogEventListener::listen(receiver));

        emitter.emit(TestEvent::TestAborted {
            name: "Test-1".to_string(),
            error: "boom".to_string(),
        });
        drop(emitter);

        handle.await.unwrap();
    }
}
