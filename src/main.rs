mod global_configuration;

use crate::global_configuration::global_config;
use fancytest::{detect_tests, TestReporter, TestRunner, Theme};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = global_config();

    let theme = match &config.theme {
        Some(path) => match Theme::load(path) {
            Ok(theme) => theme,
            Err(error) => {
                eprintln!("fancytest: {error}");
                return ExitCode::FAILURE;
            }
        },
        None => Theme::default(),
    };

    let mut suite = match detect_tests(&config.base_dir) {
        Ok(suite) => suite,
        Err(error) => {
            eprintln!("fancytest: {error}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(filter) = &config.filter {
        suite.filter(filter);
    }

    let reporter = TestReporter::new(std::io::stderr())
        .with_verbosity(config.verbosity)
        .with_theme(theme)
        .with_color(config.color);
    let mut runner = TestRunner::new(reporter);

    match runner.run(&suite) {
        Ok(report) => report.exit_code(),
        Err(error) => {
            eprintln!("fancytest: failed to write test report: {error}");
            ExitCode::FAILURE
        }
    }
}
