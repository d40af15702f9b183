//! Web driver implementation using Playwright
//!
//! Each `launch` starts a fresh Playwright driver process and browser, so no
//! state is shared between test cases.

use anyhow::{Context, Result};
use async_trait::async_trait;
use playwright::api::{Browser, Page, Viewport};
use playwright::Playwright;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::driver::traits::{BrowserLauncher, BrowserSession};
use crate::utils::Config;

/// Web driver configuration
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl From<&Config> for WebDriverConfig {
    fn from(config: &Config) -> Self {
        Self {
            headless: config.headless,
            executable: config.browser_path.clone(),
            ..Self::default()
        }
    }
}

/// Launches Playwright-backed browser sessions
pub struct PlaywrightLauncher {
    config: WebDriverConfig,
}

impl PlaywrightLauncher {
    pub fn new(config: WebDriverConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserLauncher for PlaywrightLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        let session = WebSession::start(&self.config).await?;
        Ok(Box::new(session))
    }
}

/// A single browser with one page, owned for the duration of a test case
pub struct WebSession {
    // Keeps the driver process alive while the browser is in use
    #[allow(dead_code)]
    playwright: Playwright,
    browser: Browser,
    page: Mutex<Page>,
}

impl WebSession {
    async fn start(config: &WebDriverConfig) -> Result<Self> {
        let playwright = Playwright::initialize()
            .await
            .context("Failed to initialize Playwright")?;

        let browser = launch_chromium_browser(&playwright, config).await?;

        let context = browser.context_builder().build().await?;
        let page = context.new_page().await?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await?;

        log::debug!("Launched Chromium (headless: {})", config.headless);

        Ok(Self {
            playwright,
            browser,
            page: Mutex::new(page),
        })
    }
}

#[async_trait]
impl BrowserSession for WebSession {
    async fn goto(&self, url: &str) -> Result<()> {
        let page = self.page.lock().await;
        page.goto_builder(url)
            .goto()
            .await
            .with_context(|| format!("Failed to navigate to URL: {}", url))?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let page = self.page.lock().await;
        page.click_builder(selector)
            .click()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to click: {}. Error: {:?}", selector, e))
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let page = self.page.lock().await;
        page.fill_builder(selector, value)
            .fill()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fill: {}. Error: {:?}", selector, e))
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let page = self.page.lock().await;
        page.screenshot_builder()
            .path(path.to_path_buf())
            .screenshot()
            .await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }
}

/// Launch Chromium, preferring an explicit executable when configured
async fn launch_chromium_browser(
    playwright: &Playwright,
    config: &WebDriverConfig,
) -> Result<Browser> {
    let args: Vec<String> = [
        "--no-sandbox",
        "--disable-setuid-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let chromium = playwright.chromium();
    let mut launcher = chromium.launcher().headless(config.headless).args(&args);

    if let Some(ref path) = config.executable {
        log::info!("Using browser executable: {}", path.display());
        launcher = launcher.executable(path);
    }

    launcher
        .launch()
        .await
        .context("Failed to launch Chromium")
}
