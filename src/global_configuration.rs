use clap::Parser;
use fancytest::Verbosity;
use regex::Regex;
use std::path::PathBuf;
use std::process::exit;
use std::sync::OnceLock;

pub struct RunnerConfig {
    pub base_dir: PathBuf,
    pub verbosity: Verbosity,
    pub filter: Option<Regex>,
    pub theme: Option<PathBuf>,
    pub color: bool,
}

pub fn global_config() -> &'static RunnerConfig {
    static CONFIG: OnceLock<RunnerConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        let args = Args::parse();

        let base_dir = match args.base_folder.canonicalize() {
            Ok(base_dir) => base_dir,
            Err(error) => {
                eprintln!(
                    "fancytest: cannot open base folder {}: {error}",
                    args.base_folder.display()
                );
                exit(1);
            }
        };

        let verbosity = if args.quiet {
            Verbosity::Quiet
        } else if args.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Dots
        };

        let color = !args.no_color && std::env::var_os("NO_COLOR").is_none();

        RunnerConfig {
            base_dir,
            verbosity,
            filter: args.filter,
            theme: args.theme,
            color,
        }
    })
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Base folder searched recursively for test manifests
    #[arg(long, default_value = ".")]
    base_folder: PathBuf,

    /// Print a line per test instead of dots
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Suppress per-test output, print only the summary
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    quiet: bool,

    /// Only run tests whose name matches this regular expression
    #[arg(long)]
    filter: Option<Regex>,

    /// Theme file overriding colors and glyphs
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Disable ANSI styling (the NO_COLOR environment variable does too)
    #[arg(long, default_value_t = false)]
    no_color: bool,
}
