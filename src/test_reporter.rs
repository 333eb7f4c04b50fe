// The result collector: reacts to per-test lifecycle callbacks by
// writing styled glyphs, accumulates counts and failure detail, and
// prints the deferred error lists and the final summary line.

use crate::stylize::{Style, StyledStream};
use crate::test_case::{TestCase, TestOutcome};
use crate::theme::Theme;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// No per-test output, summary only.
    Quiet,
    /// One styled character per test.
    #[default]
    Dots,
    /// One line per test, with group headers.
    Verbose,
}

/// Tally of one run. A run is successful iff failures, errors and
/// unexpected successes are all zero.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub tests_run: usize,
    pub successes: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
    pub expected_failures: usize,
    pub unexpected_successes: usize,
}

impl OutcomeCounts {
    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.failures == 0 && self.errors == 0 && self.unexpected_successes == 0
    }
}

pub struct TestReporter<W: Write> {
    stream: StyledStream<W>,
    verbosity: Verbosity,
    descriptions: bool,
    theme: Theme,
    counts: OutcomeCounts,
    // (description, message) pairs for the deferred lists.
    failures: Vec<(String, String)>,
    errors: Vec<(String, String)>,
    last_group: Option<String>,
}

impl<W: Write> TestReporter<W> {
    pub fn new(stream: W) -> Self {
        TestReporter {
            stream: StyledStream::new(stream),
            verbosity: Verbosity::default(),
            descriptions: true,
            theme: Theme::default(),
            counts: OutcomeCounts::default(),
            failures: Vec::new(),
            errors: Vec::new(),
            last_group: None,
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// When off, case names are printed instead of descriptions.
    #[must_use]
    pub fn with_descriptions(mut self, descriptions: bool) -> Self {
        self.descriptions = descriptions;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.stream = self.stream.with_color(color);
        self
    }

    #[must_use]
    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }

    #[must_use]
    pub fn was_successful(&self) -> bool {
        self.counts.was_successful()
    }

    fn description(&self, case: &TestCase) -> String {
        if self.descriptions {
            case.description.clone().unwrap_or_else(|| case.name.clone())
        } else {
            case.name.clone()
        }
    }

    /// Called before a case runs. In verbose mode prints a bold group
    /// header whenever the case's group changes.
    pub fn start_test(&mut self, case: &TestCase) -> io::Result<()> {
        self.counts.tests_run += 1;

        if self.verbosity != Verbosity::Verbose || case.group.is_empty() {
            return Ok(());
        }
        if self.last_group.as_deref() == Some(case.group.as_str()) {
            return Ok(());
        }
        self.stream.newline()?;
        self.stream.writeln_styled(
            &format!("{} {}", self.theme.diamond, case.group),
            &[Style::Bold],
        )?;
        self.stream.newline()?;
        self.last_group = Some(case.group.clone());
        Ok(())
    }

    /// Called once per case with its outcome. Writes the glyph and
    /// stashes failure/error detail for the deferred lists.
    pub fn record(
        &mut self,
        case: &TestCase,
        outcome: TestOutcome,
        message: Option<String>,
    ) -> io::Result<()> {
        let description = self.description(case);
        match outcome {
            TestOutcome::Success => self.counts.successes += 1,
            TestOutcome::Failure => {
                self.counts.failures += 1;
                self.failures.push((description.clone(), message.clone().unwrap_or_default()));
            }
            TestOutcome::Error => {
                self.counts.errors += 1;
                self.errors.push((description.clone(), message.clone().unwrap_or_default()));
            }
            TestOutcome::Skipped => self.counts.skipped += 1,
            TestOutcome::ExpectedFailure => self.counts.expected_failures += 1,
            TestOutcome::UnexpectedSuccess => self.counts.unexpected_successes += 1,
        }

        match self.verbosity {
            Verbosity::Quiet => Ok(()),
            Verbosity::Dots => {
                let base = self.theme.base_styles(outcome).to_vec();
                self.stream.write_styled(self.theme.dot(outcome), &base)?;
                self.stream.flush()
            }
            Verbosity::Verbose => self.write_verbose_line(outcome, &description, message.as_deref()),
        }
    }

    fn write_verbose_line(
        &mut self,
        outcome: TestOutcome,
        description: &str,
        message: Option<&str>,
    ) -> io::Result<()> {
        let base = self.theme.base_styles(outcome).to_vec();
        let mut glyph_styles = base.clone();
        glyph_styles.push(Style::Bold);

        self.stream
            .write_styled(&format!("  {}", self.theme.glyph(outcome)), &glyph_styles)?;

        let annotation = match outcome {
            TestOutcome::Skipped => match message {
                Some(reason) if !reason.is_empty() => format!(" (skipped: {reason})"),
                _ => " (skipped)".to_string(),
            },
            TestOutcome::ExpectedFailure => " (expected failure)".to_string(),
            TestOutcome::UnexpectedSuccess => " (unexpected success)".to_string(),
            _ => String::new(),
        };
        let text = format!(" {description}{annotation}");

        // Successes keep the description unstyled.
        if outcome == TestOutcome::Success {
            self.stream.writeln(&text)
        } else {
            self.stream.writeln_styled(&text, &base)
        }
    }

    /// Prints the deferred detail lists, errors before failures.
    pub fn print_errors(&mut self) -> io::Result<()> {
        if self.failures.is_empty() && self.errors.is_empty() {
            return Ok(());
        }
        self.stream.newline()?;
        print_error_list(&mut self.stream, "ERROR", Style::Yellow, &self.errors)?;
        print_error_list(&mut self.stream, "FAIL", Style::Red, &self.failures)
    }

    pub fn print_summary(&mut self, time: Duration) -> io::Result<()> {
        let counts = self.counts;
        if counts.was_successful() {
            self.stream.newline()?;
            let plural = if counts.tests_run == 1 { "" } else { "s" };
            return self.stream.writeln_styled(
                &format!(
                    "{} OK {} test{} complete",
                    self.theme.check_mark, counts.tests_run, plural
                ),
                &[Style::Green, Style::Bold],
            );
        }

        self.stream
            .write_styled(&format!("{} FAILED ", self.theme.ballot_x), &[Style::Red])?;
        self.stream.write("(")?;
        let fields = [
            ("failures", counts.failures),
            ("errors", counts.errors),
            ("skipped", counts.skipped),
            ("expected failures", counts.expected_failures),
            ("unexpected successes", counts.unexpected_successes),
        ];
        let mut first = true;
        for (label, count) in fields {
            if count == 0 {
                continue;
            }
            if !first {
                self.stream.write(", ")?;
            }
            self.stream.write(&format!("{label}={count}"))?;
            first = false;
        }
        if !first {
            self.stream.write(", ")?;
        }
        self.stream.write(&format!("tests={}", counts.tests_run))?;
        self.stream
            .writeln(&format!(") ({:.3}s)", time.as_secs_f64()))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }

    pub fn into_inner(self) -> W {
        self.stream.into_inner()
    }
}

fn print_error_list<W: Write>(
    stream: &mut StyledStream<W>,
    flavour: &str,
    style: Style,
    entries: &[(String, String)],
) -> io::Result<()> {
    for (description, message) in entries {
        stream.write_styled(flavour, &[style])?;
        stream.writeln(&format!(": {description}"))?;
        stream.writeln(&format!("  {}", message.replace('\n', "\n  ")))?;
    }
    Ok(())
}
