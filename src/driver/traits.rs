use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// An open browser with a single page.
///
/// Every operation is one round trip to the browser process. Implementations
/// must release all browser resources in `close`.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page to `url`
    async fn goto(&self, url: &str) -> Result<()>;

    /// Click the element matching `selector`
    async fn click(&self, selector: &str) -> Result<()>;

    /// Replace the value of the input matching `selector`
    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Save a PNG of the viewport to `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Shut down the browser
    async fn close(&self) -> Result<()>;
}

/// Starts browser sessions. One session is launched per test case.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}
