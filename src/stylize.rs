// ANSI text styling: a fixed table of named styles, each a paired
// open/close escape code, plus a stream decorator with styled writes.

use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("unknown style name: {0:?}")]
    UnknownStyle(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    Italic,
    Underline,
    Cyan,
    Yellow,
    Green,
    Red,
    Grey,
    GreenHi,
}

impl Style {
    pub const ALL: [Style; 9] = [
        Style::Bold,
        Style::Italic,
        Style::Underline,
        Style::Cyan,
        Style::Yellow,
        Style::Green,
        Style::Red,
        Style::Grey,
        Style::GreenHi,
    ];

    // (open, close) SGR codes. The close code restores the previous
    // state for that attribute, it is not a full reset.
    #[must_use]
    pub fn codes(self) -> (u8, u8) {
        match self {
            Style::Bold => (1, 22),
            Style::Italic => (3, 23),
            Style::Underline => (4, 24),
            Style::Cyan => (96, 39),
            Style::Yellow => (33, 39),
            Style::Green => (32, 39),
            Style::Red => (31, 39),
            Style::Grey => (90, 39),
            Style::GreenHi => (92, 32),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::Underline => "underline",
            Style::Cyan => "cyan",
            Style::Yellow => "yellow",
            Style::Green => "green",
            Style::Red => "red",
            Style::Grey => "grey",
            Style::GreenHi => "green-hi",
        }
    }

    pub fn from_name(name: &str) -> Result<Style, StyleError> {
        Style::ALL
            .into_iter()
            .find(|style| style.name() == name)
            .ok_or_else(|| StyleError::UnknownStyle(name.to_string()))
    }
}

/// Parses a colon-joined list of style names, e.g. `"green:bold"`.
pub fn parse_styles(spec: &str) -> Result<Vec<Style>, StyleError> {
    spec.split(':').map(Style::from_name).collect()
}

/// Wraps `text` in the escape pairs of `styles`. Open codes and close
/// codes are both emitted in the order the styles are listed.
#[must_use]
pub fn apply(text: &str, styles: &[Style]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for style in styles {
        let _ = write!(out, "\x1b[{}m", style.codes().0);
    }
    out.push_str(text);
    for style in styles {
        let _ = write!(out, "\x1b[{}m", style.codes().1);
    }
    out
}

/// Stylizes `text` by a colon-joined style spec, e.g.
/// `stylize("ok", "green:bold")`.
pub fn stylize(text: &str, spec: &str) -> Result<String, StyleError> {
    Ok(apply(text, &parse_styles(spec)?))
}

/// Decorates any writer with styled `write`/`writeln`. When `color` is
/// off, styled writes degrade to plain text.
pub struct StyledStream<W: Write> {
    stream: W,
    color: bool,
}

impl<W: Write> StyledStream<W> {
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            color: true,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.stream.write_all(text.as_bytes())
    }

    pub fn write_styled(&mut self, text: &str, styles: &[Style]) -> io::Result<()> {
        if self.color && !styles.is_empty() {
            self.write(&apply(text, styles))
        } else {
            self.write(text)
        }
    }

    pub fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.newline()
    }

    // The trailing newline is never styled.
    pub fn writeln_styled(&mut self, text: &str, styles: &[Style]) -> io::Result<()> {
        self.write_styled(text, styles)?;
        self.newline()
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.write("\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}
