//! Structured reports for build and test command output.
//!
//! Parsing is best-effort: cargo's diagnostic and libtest summary formats
//! are recognized, anything else degrades to a generic report carrying the
//! exit code and raw streams. A report is never an error.

use crate::cmd::CommandResult;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub exit_code: i32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<TestReport>,
    pub stdout: String,
    pub stderr: String,
}

/// Compiler diagnostics pulled out of the build output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Counts from the test harness summary line.
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub passed: u64,
    pub failed: u64,
    pub ignored: u64,
    pub failures: Vec<String>,
}

fn error_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^error(\[E\d+\])?: (.+)$").unwrap())
}

fn warning_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^warning: (.+)$").unwrap())
}

fn test_summary_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^test result: (ok|FAILED)\. (\d+) passed; (\d+) failed; (\d+) ignored")
            .unwrap()
    })
}

fn failed_test_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^test (\S+) \.\.\. FAILED$").unwrap())
}

/// Shape a finished command into the JSON report sent to the client.
pub fn from_result(command: &str, result: &CommandResult) -> CommandReport {
    let build = parse_build(&result.err);
    let tests = parse_tests(&result.out);

    CommandReport {
        command: command.to_string(),
        exit_code: result.code,
        success: result.code == 0,
        build,
        tests,
        stdout: result.out.clone(),
        stderr: result.err.clone(),
    }
}

fn parse_build(stderr: &str) -> Option<BuildReport> {
    let mut report = BuildReport::default();
    for line in stderr.lines() {
        if let Some(captures) = error_line().captures(line) {
            let message = &captures[2];
            // The roll-up line repeats diagnostics already collected.
            if message.starts_with("aborting due to") {
                continue;
            }
            report.errors.push(message.to_string());
        } else if let Some(captures) = warning_line().captures(line) {
            let message = &captures[1];
            if warning_summary(message) {
                continue;
            }
            report.warnings.push(message.to_string());
        }
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        return None;
    }
    Some(report)
}

/// cargo ends warning runs with "`name` (lib) generated N warnings".
fn warning_summary(message: &str) -> bool {
    message.contains("generated") && message.contains("warning")
}

fn parse_tests(stdout: &str) -> Option<TestReport> {
    let mut totals: Option<(u64, u64, u64)> = None;
    let mut failures = Vec::new();

    for line in stdout.lines() {
        if let Some(captures) = test_summary_line().captures(line) {
            let passed = captures[2].parse().unwrap_or(0);
            let failed = captures[3].parse().unwrap_or(0);
            let ignored = captures[4].parse().unwrap_or(0);
            // Workspaces print one summary per test binary; accumulate.
            let (p, f, i) = totals.unwrap_or((0, 0, 0));
            totals = Some((p + passed, f + failed, i + ignored));
        } else if let Some(captures) = failed_test_line().captures(line) {
            failures.push(captures[1].to_string());
        }
    }

    totals.map(|(passed, failed, ignored)| TestReport {
        passed,
        failed,
        ignored,
        failures,
    })
}
