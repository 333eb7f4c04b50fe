use crate::test_case::TestSuite;
use crate::test_reporter::{OutcomeCounts, TestReporter};
use std::io::{self, Write};
use std::panic;
use std::process::ExitCode;
use std::time::{Duration, Instant};

pub struct RunReport {
    pub counts: OutcomeCounts,
    pub time: Duration,
}

impl RunReport {
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.counts.was_successful()
    }

    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.was_successful() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Drives a suite against the reporter and prints the final tally.
pub struct TestRunner<W: Write> {
    reporter: TestReporter<W>,
}

impl<W: Write> TestRunner<W> {
    pub fn new(reporter: TestReporter<W>) -> Self {
        TestRunner { reporter }
    }

    pub fn run(&mut self, suite: &TestSuite) -> io::Result<RunReport> {
        let start = Instant::now();

        // Panics inside closure cases become failure messages; silence
        // the default hook so backtraces don't interleave with glyphs.
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let run_result: io::Result<()> = suite.cases().iter().try_for_each(|case| {
            self.reporter.start_test(case)?;
            let (outcome, message) = case.run();
            self.reporter.record(case, outcome, message)
        });
        panic::set_hook(previous_hook);
        run_result?;

        let time = start.elapsed();
        self.reporter.print_errors()?;
        self.reporter.print_summary(time)?;
        self.reporter.flush()?;

        Ok(RunReport {
            counts: self.reporter.counts(),
            time,
        })
    }

    pub fn into_inner(self) -> W {
        self.reporter.into_inner()
    }
}
