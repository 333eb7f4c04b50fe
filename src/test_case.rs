// Test cases and suites: the minimal execution contract the reporter
// decorates. A case body is a closure or an external command; running a
// case yields exactly one terminal outcome.

use regex::Regex;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Raw status reported by a case body, before skip/xfail markers apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseStatus {
    Pass,
    Fail(String),
    Error(String),
    Skip(String),
}

/// Final outcome of one executed case.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TestOutcome {
    Success,
    Failure,
    Error,
    Skipped,
    ExpectedFailure,
    UnexpectedSuccess,
}

pub enum TestBody {
    Fn(Box<dyn Fn() -> CaseStatus>),
    Command {
        command: String,
        expect_code: i32,
        working_dir: PathBuf,
    },
}

pub struct TestCase {
    pub name: String,
    pub description: Option<String>,
    // The "test class" of the verbose header; empty means no header.
    pub group: String,
    // Skip reason; Some("") skips without a reason.
    pub skip: Option<String>,
    pub xfail: bool,
    pub body: TestBody,
}

impl TestCase {
    pub fn new(name: impl Into<String>, body: impl Fn() -> CaseStatus + 'static) -> Self {
        TestCase {
            name: name.into(),
            description: None,
            group: String::new(),
            skip: None,
            xfail: false,
            body: TestBody::Fn(Box::new(body)),
        }
    }

    pub fn command(
        name: impl Into<String>,
        command: impl Into<String>,
        expect_code: i32,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        TestCase {
            name: name.into(),
            description: None,
            group: String::new(),
            skip: None,
            xfail: false,
            body: TestBody::Command {
                command: command.into(),
                expect_code,
                working_dir: working_dir.into(),
            },
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn skipped(mut self, reason: impl Into<String>) -> Self {
        self.skip = Some(reason.into());
        self
    }

    #[must_use]
    pub fn expect_failure(mut self) -> Self {
        self.xfail = true;
        self
    }

    /// Executes the case and folds the skip/xfail markers into the raw
    /// status. The message accompanies failures, errors and skips.
    pub fn run(&self) -> (TestOutcome, Option<String>) {
        if let Some(reason) = &self.skip {
            return (TestOutcome::Skipped, Some(reason.clone()));
        }

        let status = match &self.body {
            TestBody::Fn(body) => match catch_unwind(AssertUnwindSafe(|| body())) {
                Ok(status) => status,
                Err(payload) => CaseStatus::Fail(panic_message(payload.as_ref())),
            },
            TestBody::Command {
                command,
                expect_code,
                working_dir,
            } => run_command(command, *expect_code, working_dir),
        };

        match (status, self.xfail) {
            (CaseStatus::Pass, false) => (TestOutcome::Success, None),
            (CaseStatus::Pass, true) => (TestOutcome::UnexpectedSuccess, None),
            (CaseStatus::Fail(_), true) => (TestOutcome::ExpectedFailure, None),
            (CaseStatus::Fail(message), false) => (TestOutcome::Failure, Some(message)),
            // Infrastructure errors are never expected, xfail or not.
            (CaseStatus::Error(message), _) => (TestOutcome::Error, Some(message)),
            (CaseStatus::Skip(reason), _) => (TestOutcome::Skipped, Some(reason)),
        }
    }
}

fn run_command(command: &str, expect_code: i32, working_dir: &Path) -> CaseStatus {
    let output = Command::new("sh")
        .current_dir(working_dir)
        .args(["-c", command])
        .output();

    let output = match output {
        Ok(output) => output,
        Err(error) => return CaseStatus::Error(format!("failed to run command: {error}")),
    };

    let actual_code = output.status.code();
    if actual_code == Some(expect_code) {
        return CaseStatus::Pass;
    }

    let mut message = match actual_code {
        Some(code) => format!("expected return code {expect_code}, got {code}"),
        None => format!("expected return code {expect_code}, got none (terminated by signal)"),
    };
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        message.push_str("\nwith error message:\n");
        message.push_str(stderr.trim_end());
    }
    CaseStatus::Fail(message)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "test panicked".to_string()
    }
}

/// An ordered list of cases.
#[derive(Default)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Keeps only the cases whose name matches `pattern`.
    pub fn filter(&mut self, pattern: &Regex) {
        self.cases.retain(|case| pattern.is_match(&case.name));
    }
}
