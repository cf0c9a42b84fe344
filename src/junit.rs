use junit_report::{Duration, ReportBuilder, TestCaseBuilder, TestSuiteBuilder};
use std::fs::File;
use std::path::Path;

use crate::error::{HarnessError, HarnessResult};
use crate::runner::RunResult;

/// One testcase per stretch vector; mismatches become failures carrying the
/// diagnostic line.
pub fn write_junit_xml(result: &RunResult, path: &Path) -> HarnessResult<()> {
    let mut test_cases = Vec::new();

    for o in result.scoreboard.outcomes() {
        let name = format!("{}::ix{}", result.scenario, o.index);
        let tc = match o.passed() {
            true => TestCaseBuilder::success(&name, Duration::ZERO),
            false => TestCaseBuilder::failure(&name, Duration::ZERO, "mismatch", &o.diagnostic()),
        }
        .build();
        test_cases.push(tc);
    }

    let suite_name = crate::CRATE_NAME
        .get()
        .map(String::as_str)
        .unwrap_or(env!("CARGO_PKG_NAME"));
    let test_suite = TestSuiteBuilder::new(suite_name)
        .add_testcases(test_cases)
        .build();
    let report = ReportBuilder::new().add_testsuite(test_suite).build();
    let file = File::create(path)?;
    report
        .write_xml(file)
        .map_err(|e| HarnessError::Report(e.to_string()))
}
