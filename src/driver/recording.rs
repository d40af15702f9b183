//! In-memory browser used by tests. Records every call instead of driving a
//! real page.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::traits::{BrowserLauncher, BrowserSession};

/// Bytes of an 8-byte PNG signature, enough for a file that looks like a screenshot
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Launch,
    Goto(String),
    Click(String),
    Fill(String, String),
    Screenshot(String),
    Close,
}

/// Launcher whose sessions append to a shared call log
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    calls: Arc<Mutex<Vec<Call>>>,
    missing_selector: Option<String>,
    fail_launch: bool,
    fail_close: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make clicks and fills on `selector` fail as if the element were absent
    pub fn with_missing_selector(mut self, selector: &str) -> Self {
        self.missing_selector = Some(selector.to_string());
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Record the close, then report it as failed
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserLauncher for RecordingLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        if self.fail_launch {
            anyhow::bail!("browser executable not found");
        }
        self.calls.lock().unwrap().push(Call::Launch);
        Ok(Box::new(RecordingSession {
            calls: self.calls.clone(),
            missing_selector: self.missing_selector.clone(),
            fail_close: self.fail_close,
        }))
    }
}

struct RecordingSession {
    calls: Arc<Mutex<Vec<Call>>>,
    missing_selector: Option<String>,
    fail_close: bool,
}

impl RecordingSession {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, selector: &str) -> Result<()> {
        if self.missing_selector.as_deref() == Some(selector) {
            anyhow::bail!("Timeout waiting for selector \"{}\"", selector);
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for RecordingSession {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(Call::Goto(url.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.check(selector)?;
        self.record(Call::Click(selector.to_string()));
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.check(selector)?;
        self.record(Call::Fill(selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, PNG_SIGNATURE)?;
        self.record(Call::Screenshot(path.display().to_string()));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(Call::Close);
        if self.fail_close {
            anyhow::bail!("browser process already exited");
        }
        Ok(())
    }
}
