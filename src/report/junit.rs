use super::types::TestReport;
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Generate a JUnit XML document from stored reports
pub fn generate_junit_xml(reports: &[TestReport], timestamp: &str) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let total_tests = reports.len().to_string();
    let failures = reports.iter().filter(|r| !r.passed()).count().to_string();

    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "webtest-agents"));
    suites_start.push_attribute(("tests", total_tests.as_str()));
    suites_start.push_attribute(("failures", failures.as_str()));
    writer.write_event(Event::Start(suites_start))?;

    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "default"));
    suite_start.push_attribute(("tests", total_tests.as_str()));
    suite_start.push_attribute(("failures", failures.as_str()));
    suite_start.push_attribute(("skipped", "0"));
    suite_start.push_attribute(("timestamp", timestamp));
    writer.write_event(Event::Start(suite_start))?;

    for report in reports {
        write_test_case(&mut writer, report)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(writer: &mut Writer<W>, report: &TestReport) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", report.test_case.as_str()));
    case_start.push_attribute(("classname", "webtest"));
    writer.write_event(Event::Start(case_start))?;

    if !report.passed() {
        let mut fail_start = BytesStart::new("failure");
        fail_start.push_attribute(("message", report.notes.as_str()));
        fail_start.push_attribute(("type", report.verdict.as_str()));
        writer.write_event(Event::Empty(fail_start))?;
    }

    // Artifacts go to system-out so CI viewers can link the screenshots
    if !report.artifacts.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("system-out")))?;
        writer.write_event(Event::Text(BytesText::new(&report.artifacts.join("\n"))))?;
        writer.write_event(Event::End(BytesEnd::new("system-out")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}
