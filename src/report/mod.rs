pub mod json;
pub mod junit;
pub mod types;

pub use json::{ReportStore, StoreError};
pub use types::TestReport;

use anyhow::Result;

/// Render a stored report in the requested format
pub fn render_report(store: &ReportStore, name: &str, format: &str) -> Result<String> {
    match format {
        "json" => match store.load(name)? {
            Some(report) => Ok(serde_json::to_string_pretty(&report)?),
            None => anyhow::bail!("Report not found: {}", name),
        },
        "junit" => {
            let reports = match store.load(name)? {
                Some(report) => vec![report],
                None => anyhow::bail!("Report not found: {}", name),
            };
            junit::generate_junit_xml(&reports, &timestamp())
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// RFC 3339 timestamp used in exported documents
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReportStore::new(dir.path());
        store
            .save(&TestReport {
                test_case: "Test-3".to_string(),
                verdict: "Pass".to_string(),
                artifacts: vec![],
                reproducibility: 100,
                notes: "Executed successfully".to_string(),
            })
            .unwrap();

        let json = render_report(&store, "Test-3", "json").unwrap();
        assert!(json.contains("\"reproducibility\": 100"));

        let xml = render_report(&store, "Test-3", "junit").unwrap();
        assert!(xml.contains(r#"<testcase name="Test-3""#));

        assert!(render_report(&store, "Test-3", "html").is_err());
        assert!(render_report(&store, "Test-9", "json").is_err());
    }
}
