use std::fmt;
use std::path::PathBuf;

use crate::config::Rule;

/// Zero-based `(line, col, end_col)` triple on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
    pub end_col: usize,
}

/// How seriously the host should present a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Reasons a diagnostic cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticError {
    /// `col` is past `end_col`.
    #[error("column range is inverted: {col} > {end_col}")]
    InvertedColumns { col: usize, end_col: usize },
    /// The message is empty.
    #[error("diagnostic message is empty")]
    EmptyMessage,
}

/// One reported finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub line: usize,
    pub col: usize,
    pub end_col: usize,
    pub message: String,
    pub severity: Severity,
    pub rule: Rule,
}

impl Diagnostic {
    /// Build a diagnostic, checking `col <= end_col` and a non-empty
    /// message.
    pub fn new(
        file: impl Into<PathBuf>,
        position: Position,
        message: impl Into<String>,
        severity: Severity,
        rule: Rule,
    ) -> Result<Self, DiagnosticError> {
        let Position { line, col, end_col } = position;
        if col > end_col {
            return Err(DiagnosticError::InvertedColumns { col, end_col });
        }
        let message = message.into();
        if message.is_empty() {
            return Err(DiagnosticError::EmptyMessage);
        }
        Ok(Self {
            file: file.into(),
            line,
            col,
            end_col,
            message,
            severity,
            rule,
        })
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            line: self.line,
            col: self.col,
            end_col: self.end_col,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {} [{}]",
            self.file.display(),
            self.line + 1,
            self.col + 1,
            self.severity,
            self.message,
            self.rule
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize, col: usize, end_col: usize) -> Position {
        Position { line, col, end_col }
    }

    #[test]
    fn valid_construction() {
        let d = Diagnostic::new(
            "Makefile",
            at(1, 8, 11),
            "undefined name 'FOO'",
            Severity::Error,
            Rule::UndefinedVariable,
        )
        .expect("valid diagnostic");
        assert_eq!(d.position(), at(1, 8, 11));
        assert_eq!(
            d.to_string(),
            "Makefile:2:9: error: undefined name 'FOO' [undefined-variable]"
        );
    }

    #[test]
    fn inverted_columns_rejected() {
        let err = Diagnostic::new(
            "Makefile",
            at(0, 4, 2),
            "x",
            Severity::Error,
            Rule::TrailingSpaces,
        )
        .unwrap_err();
        assert_eq!(err, DiagnosticError::InvertedColumns { col: 4, end_col: 2 });
    }

    #[test]
    fn empty_message_rejected() {
        let err = Diagnostic::new(
            "Makefile",
            at(0, 0, 0),
            "",
            Severity::Warning,
            Rule::TrailingSpaces,
        )
        .unwrap_err();
        assert_eq!(err, DiagnosticError::EmptyMessage);
    }
}
