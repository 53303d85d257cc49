use crate::pathlib::FilePath;
use crate::span::Span;

use colored::*;
use std::io;
use std::{fmt, str::Utf8Error};

pub type HighlightResult<T = ()> = Result<T, HighlightError>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HighlightErrorKind {
    Parse,
    IO,
}

impl fmt::Display for HighlightErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HighlightErrorKind::Parse => "parse error",
                HighlightErrorKind::IO => "i/o error",
            }
        )
    }
}

#[derive(Debug)]
pub struct HighlightError {
    pub msg: String,
    pub span: Option<Span>,
    pub kind: HighlightErrorKind,
}

impl HighlightError {
    pub fn parse<S: Into<String>>(msg: S, span: Span) -> HighlightError {
        HighlightError {
            msg: msg.into(),
            span: Some(span),
            kind: HighlightErrorKind::Parse,
        }
    }

    /// Prints the error to stderr. When both the file and its contents are
    /// known, the offending line is echoed with the span underlined.
    pub fn emit(&self, filepath: Option<&FilePath>, source: Option<&str>) {
        let kind = format!("{}:", self.kind);
        eprintln!("{} {}", kind.bold().red(), self.msg.bold());

        let arrow = "-->".bold();
        let (span, filepath) = match (self.span, filepath) {
            (Some(span), Some(filepath)) => (span, filepath),
            (None, Some(filepath)) => {
                eprintln!(" {} {}", arrow, filepath);
                eprintln!();
                return;
            }
            _ => {
                eprintln!();
                return;
            }
        };

        let line = source.and_then(|src| src.lines().nth(span.start.lineno));
        let lineno_str = (span.start.lineno + 1).to_string();
        let full_spacing = " ".repeat(lineno_str.len() + 1);
        let pipe = "|".bold();

        eprintln!("{}{} {}:{}", " ".repeat(lineno_str.len()), arrow, filepath, span);
        if let Some(line) = line {
            eprintln!("{}{}", full_spacing, pipe);
            eprintln!("{} {} {}", lineno_str.bold(), pipe, line);

            // underline at least one column, and never past the end of the line
            let indent = " ".repeat(span.start.col);
            let remaining = line.chars().count().saturating_sub(span.start.col);
            let width = if span.lines() == 1 {
                span.end.col.saturating_sub(span.start.col)
            } else {
                remaining
            };
            let indicator = "^".repeat(width.min(remaining).max(1)).bold().red();
            eprintln!("{}{} {}{}", full_spacing, pipe, indent, indicator);
        }
        eprintln!()
    }
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{}: {} at {}", self.kind, self.msg, span),
            None => write!(f, "{}: {}", self.kind, self.msg),
        }
    }
}

impl std::error::Error for HighlightError {}

impl From<io::Error> for HighlightError {
    fn from(err: io::Error) -> HighlightError {
        HighlightError {
            msg: err.to_string(),
            span: None,
            kind: HighlightErrorKind::IO,
        }
    }
}

impl From<Utf8Error> for HighlightError {
    fn from(err: Utf8Error) -> Self {
        HighlightError {
            msg: format!("source is not valid UTF-8 ({})", err),
            span: None,
            kind: HighlightErrorKind::Parse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HighlightError, HighlightErrorKind};
    use crate::span::{Pos, Span};
    use std::io;

    #[test]
    fn display_includes_location_when_known() {
        let pos = Pos {
            lineno: 2,
            col: 4,
            offset: 20,
        };
        let err = HighlightError::parse("unclosed delimiter `{`", Span::from(pos));
        assert_eq!(err.to_string(), "parse error: unclosed delimiter `{` at 3:5");
    }

    #[test]
    fn io_errors_have_no_span() {
        let err = HighlightError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.kind, HighlightErrorKind::IO);
        assert!(err.span.is_none());
        assert_eq!(err.to_string(), "i/o error: missing");
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let bytes = vec![b'l', b'e', b't', 0xff];
        let err = HighlightError::from(std::str::from_utf8(&bytes).unwrap_err());
        assert_eq!(err.kind, HighlightErrorKind::Parse);
    }
}
