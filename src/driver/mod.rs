pub mod traits;
pub mod web;

#[cfg(test)]
pub mod recording;

pub use traits::{BrowserLauncher, BrowserSession};

use std::sync::Arc;

use crate::utils::Config;

/// Build the launcher used for real runs
pub fn default_launcher(config: &Config) -> Arc<dyn BrowserLauncher> {
    Arc::new(web::PlaywrightLauncher::new(web::WebDriverConfig::from(config)))
}
