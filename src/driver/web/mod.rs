pub mod driver;

pub use driver::{PlaywrightLauncher, WebDriverConfig, WebSession};
