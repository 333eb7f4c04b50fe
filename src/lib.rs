//! Colorful terminal reporting for test suites.
//!
//! The crate decorates per-test outcome events with ANSI colors and
//! unicode glyphs: a green `✓` or dot per success, a red `✗` per
//! failure, deferred error lists and a styled summary line. Suites can
//! be built in code from closures or discovered from `fancy_tests.toml`
//! manifests and run through the `fancytest` binary.

pub mod stylize;
pub mod test_case;
pub mod test_detector;
pub mod test_reporter;
pub mod test_runner;
pub mod theme;

pub use stylize::{parse_styles, stylize, Style, StyleError, StyledStream};
pub use test_case::{CaseStatus, TestBody, TestCase, TestOutcome, TestSuite};
pub use test_detector::{detect_tests, DetectError, MANIFEST_NAME};
pub use test_reporter::{OutcomeCounts, TestReporter, Verbosity};
pub use test_runner::{RunReport, TestRunner};
pub use theme::{Theme, ThemeError};
