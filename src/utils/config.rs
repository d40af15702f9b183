use std::path::PathBuf;

use crate::planner::generator::DEFAULT_PLAN_SIZE;
use crate::planner::ranker::DEFAULT_TOP_N;

/// Page every test case is run against unless overridden
pub const DEFAULT_TARGET_URL: &str = "https://play.ezygamers.com/";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Page opened before replaying steps
    pub target_url: String,

    /// Root for `screenshots/` and `reports/`
    pub artifacts_dir: PathBuf,

    /// Launch the browser without a window
    pub headless: bool,

    /// Explicit browser executable; Playwright's bundled Chromium otherwise
    pub browser_path: Option<PathBuf>,

    /// Number of test cases produced per planning request
    pub plan_size: usize,

    /// Tests executed when the caller does not pass `top_n`
    pub default_top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: std::env::var("WEBTEST_TARGET_URL")
                .unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string()),
            artifacts_dir: std::env::var("WEBTEST_ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("artifacts")),
            headless: std::env::var("WEBTEST_HEADLESS")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            browser_path: std::env::var("WEBTEST_BROWSER_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            plan_size: env_usize("WEBTEST_PLAN_SIZE").unwrap_or(DEFAULT_PLAN_SIZE),
            default_top_n: env_usize("WEBTEST_TOP_N").unwrap_or(DEFAULT_TOP_N),
        }
    }
}

impl Config {
    pub fn screenshots_dir(&self) -> PathBuf {
        self.artifacts_dir.join("screenshots")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.artifacts_dir.join("reports")
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn env_usize(key: &str) -> Option<usize> {
    match std::env::var(key) {
        Ok(v) => match v.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a non-negative integer", key, v);
                None
            }
        },
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("YES"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_artifact_subdirs() {
        let config = Config {
            artifacts_dir: PathBuf::from("/tmp/run"),
            ..Config::default()
        };
        assert_eq!(config.screenshots_dir(), PathBuf::from("/tmp/run/screenshots"));
        assert_eq!(config.reports_dir(), PathBuf::from("/tmp/run/reports"));
    }
}
