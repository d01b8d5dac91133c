//! Static checker for GNU Makefiles.
//!
//! Scans a single Makefile and reports undefined variables, calls to
//! undefined targets through `$(MAKE)`, space-indented lines, targets
//! that need a `.PHONY` declaration, duplicate targets, trailing
//! whitespace, and blank lines at the end of the file.
//!
//! # Quick start
//!
//! ## Lint a Makefile's text
//!
//! ```
//! use makelint_rs::lint_str;
//!
//! let found = lint_str("/nonexistent/project/Makefile", "hello:\n\techo $(FOO)\n");
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].message, "undefined name 'FOO'");
//! assert_eq!((found[0].line, found[0].col), (1, 8));
//! ```
//!
//! ## Bring your own tokenizer and directory listing
//!
//! ```
//! use makelint_rs::{Config, Linter, Rule, SourceFile, StaticProbe, tokenize};
//!
//! let source = SourceFile::new("Makefile", "docs:\n\tmkdocs build\n");
//! let tokens = tokenize(source.text());
//! let probe = StaticProbe::new(["docs", "Makefile"]);
//! let config = Config::new().disable(Rule::TrailingSpaces);
//!
//! let found = Linter::new(&source, &tokens, &probe, &config).run();
//! assert_eq!(found[0].message, "missing .PHONY declaration");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod diagnostic;
pub mod extract;
pub mod lexer;
pub mod linter;
pub mod position;
pub mod probe;
pub mod rules;
pub mod source;
pub mod token;

use std::path::PathBuf;

pub use config::{Config, ConfigError, Rule};
pub use diagnostic::{Diagnostic, DiagnosticError, Position, Severity};
pub use lexer::tokenize;
pub use linter::{Linter, lint};
pub use position::map_to_position;
pub use probe::{DirectoryProbe, FsProbe, ProbeError, StaticProbe};
pub use source::SourceFile;
pub use token::{Span, Token, TokenKind, Tokenizer};

/// Unified error type for everything fallible in the crate.
///
/// The engine itself never fails a scan: it logs and skips malformed
/// diagnostics and unreadable directories. `Diagnostic` and `Probe`
/// exist so host code calling [`Diagnostic::new`] or a
/// [`DirectoryProbe`] directly can use `?` into this one type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value could not be read.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// A diagnostic failed validation.
    #[error("{0}")]
    Diagnostic(#[from] DiagnosticError),
    /// The directory next to the Makefile could not be listed.
    #[error("{0}")]
    Probe(#[from] ProbeError),
}

/// Lint Makefile text with the default configuration, the built-in
/// lexer, and the real filesystem for the `.PHONY` check.
#[must_use]
pub fn lint_str(path: impl Into<PathBuf>, text: &str) -> Vec<Diagnostic> {
    lint(&SourceFile::new(path, text), &Config::default())
}

/// Parse rule codes such as `"trailing-spaces"` into a config with
/// those rules disabled.
pub fn config_without<'a, I>(codes: I) -> Result<Config, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut config = Config::new();
    for code in codes {
        config = config.disable(code.parse()?);
    }
    Ok(config)
}
