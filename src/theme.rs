// Glyphs and per-outcome base styles, overridable from a TOML file.

use crate::stylize::{parse_styles, Style, StyleError};
use crate::test_case::TestOutcome;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse theme file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Style(#[from] StyleError),
}

pub struct Theme {
    // CHECK MARK (U+2713), BALLOT X (U+2717), WHITE DIAMOND SUIT (U+2662)
    pub check_mark: String,
    pub ballot_x: String,
    pub diamond: String,
    pub skip_mark: String,

    success: Vec<Style>,
    failure: Vec<Style>,
    error: Vec<Style>,
    skipped: Vec<Style>,
    expected_failure: Vec<Style>,
    unexpected_success: Vec<Style>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            check_mark: "✓".to_string(),
            ballot_x: "✗".to_string(),
            diamond: "♢".to_string(),
            skip_mark: "-".to_string(),
            success: vec![Style::Green],
            failure: vec![Style::Red],
            error: vec![Style::Yellow],
            skipped: vec![Style::Grey],
            expected_failure: vec![Style::Cyan],
            unexpected_success: vec![Style::Red],
        }
    }
}

impl Theme {
    pub fn load(path: &Path) -> Result<Theme, ThemeError> {
        let text = std::fs::read_to_string(path)?;
        Theme::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Theme, ThemeError> {
        let raw: ThemeToml = toml::from_str(text)?;
        let mut theme = Theme::default();

        let overrides = [
            (&mut theme.success, raw.styles.success),
            (&mut theme.failure, raw.styles.failure),
            (&mut theme.error, raw.styles.error),
            (&mut theme.skipped, raw.styles.skipped),
            (&mut theme.expected_failure, raw.styles.expected_failure),
            (&mut theme.unexpected_success, raw.styles.unexpected_success),
        ];
        for (slot, spec) in overrides {
            if let Some(spec) = spec {
                *slot = parse_styles(&spec)?;
            }
        }

        if let Some(glyph) = raw.glyphs.check_mark {
            theme.check_mark = glyph;
        }
        if let Some(glyph) = raw.glyphs.ballot_x {
            theme.ballot_x = glyph;
        }
        if let Some(glyph) = raw.glyphs.diamond {
            theme.diamond = glyph;
        }
        if let Some(glyph) = raw.glyphs.skip_mark {
            theme.skip_mark = glyph;
        }

        Ok(theme)
    }

    /// Base style of one outcome; dots use it directly, verbose glyphs
    /// add bold on top.
    #[must_use]
    pub fn base_styles(&self, outcome: TestOutcome) -> &[Style] {
        match outcome {
            TestOutcome::Success => &self.success,
            TestOutcome::Failure => &self.failure,
            TestOutcome::Error => &self.error,
            TestOutcome::Skipped => &self.skipped,
            TestOutcome::ExpectedFailure => &self.expected_failure,
            TestOutcome::UnexpectedSuccess => &self.unexpected_success,
        }
    }

    #[must_use]
    pub fn glyph(&self, outcome: TestOutcome) -> &str {
        match outcome {
            TestOutcome::Success | TestOutcome::UnexpectedSuccess => &self.check_mark,
            TestOutcome::Failure | TestOutcome::Error | TestOutcome::ExpectedFailure => {
                &self.ballot_x
            }
            TestOutcome::Skipped => &self.skip_mark,
        }
    }

    #[must_use]
    pub fn dot(&self, outcome: TestOutcome) -> &'static str {
        match outcome {
            TestOutcome::Success => ".",
            TestOutcome::Failure => "F",
            TestOutcome::Error => "E",
            TestOutcome::Skipped => "s",
            TestOutcome::ExpectedFailure => "x",
            TestOutcome::UnexpectedSuccess => "u",
        }
    }
}

#[derive(Deserialize, Debug, Default)]
struct ThemeToml {
    #[serde(default)]
    styles: ThemeStylesToml,
    #[serde(default)]
    glyphs: ThemeGlyphsToml,
}

#[derive(Deserialize, Debug, Default)]
struct ThemeStylesToml {
    success: Option<String>,
    failure: Option<String>,
    error: Option<String>,
    skipped: Option<String>,
    expected_failure: Option<String>,
    unexpected_success: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ThemeGlyphsToml {
    check_mark: Option<String>,
    ballot_x: Option<String>,
    diamond: Option<String>,
    skip_mark: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_matches_the_builtin_rendering() {
        let theme = Theme::default();
        assert_eq!(theme.base_styles(TestOutcome::Success), &[Style::Green]);
        assert_eq!(theme.base_styles(TestOutcome::Error), &[Style::Yellow]);
        assert_eq!(theme.glyph(TestOutcome::Success), "✓");
        assert_eq!(theme.glyph(TestOutcome::Failure), "✗");
        assert_eq!(theme.dot(TestOutcome::UnexpectedSuccess), "u");
    }

    #[test]
    fn theme_overrides_merge_over_defaults() {
        let theme = Theme::from_toml_str(
            r#"
            [styles]
            success = "green-hi:bold"

            [glyphs]
            check_mark = "+"
            "#,
        )
        .unwrap();
        assert_eq!(
            theme.base_styles(TestOutcome::Success),
            &[Style::GreenHi, Style::Bold]
        );
        assert_eq!(theme.glyph(TestOutcome::Success), "+");
        // Untouched outcomes keep their defaults.
        assert_eq!(theme.base_styles(TestOutcome::Failure), &[Style::Red]);
        assert_eq!(theme.glyph(TestOutcome::Failure), "✗");
    }

    #[test]
    fn unknown_style_name_is_a_load_error() {
        let result = Theme::from_toml_str("[styles]\nfailure = \"crimson\"\n");
        assert!(matches!(
            result,
            Err(ThemeError::Style(StyleError::UnknownStyle(name))) if name == "crimson"
        ));
    }

    #[test]
    fn empty_theme_file_is_the_default_theme() {
        let theme = Theme::from_toml_str("").unwrap();
        assert_eq!(theme.check_mark, "✓");
        assert_eq!(theme.base_styles(TestOutcome::Skipped), &[Style::Grey]);
    }
}
