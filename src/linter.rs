//! The diagnostic engine: runs every enabled rule over one file.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::{Config, Rule};
use crate::diagnostic::{Diagnostic, Position};
use crate::extract;
use crate::lexer::tokenize;
use crate::position::map_to_position;
use crate::probe::{DirectoryProbe, FsProbe};
use crate::rules;
use crate::source::SourceFile;
use crate::token::{Span, TokenKind, Tokenizer};

/// Lint a file with the built-in lexer and the real filesystem.
#[must_use]
pub fn lint(source: &SourceFile, config: &Config) -> Vec<Diagnostic> {
    let tokens = tokenize(source.text());
    Linter::new(source, &tokens, &FsProbe, config).run()
}

/// One scan of one file.
///
/// Holds no state beyond the scan; build a new one for every run.
pub struct Linter<'a> {
    source: &'a SourceFile,
    tokenizer: &'a dyn Tokenizer,
    probe: &'a dyn DirectoryProbe,
    config: &'a Config,
    lines: Vec<&'a str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Linter<'a> {
    #[must_use]
    pub fn new(
        source: &'a SourceFile,
        tokenizer: &'a dyn Tokenizer,
        probe: &'a dyn DirectoryProbe,
        config: &'a Config,
    ) -> Self {
        Self {
            source,
            tokenizer,
            probe,
            config,
            lines: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run every enabled rule and return the diagnostics in emission
    /// order. Files outside the Makefile grammar yield nothing.
    #[must_use]
    pub fn run(mut self) -> Vec<Diagnostic> {
        if !self.source.is_makefile() {
            debug!(path = %self.source.path().display(), "not a makefile, skipping");
            return Vec::new();
        }
        self.lines = self.source.lines();
        let tokens: usize = TokenKind::ALL
            .into_iter()
            .map(|kind| self.tokenizer.find_spans(kind).len())
            .sum();
        debug!(
            path = %self.source.path().display(),
            lines = self.lines.len(),
            tokens,
            "linting"
        );

        for rule in Rule::ALL {
            if !self.config.is_enabled(rule) {
                continue;
            }
            let before = self.diagnostics.len();
            match rule {
                Rule::UndefinedVariable => self.find_undefined_variables(),
                Rule::UndefinedTarget => self.find_undefined_target_calls(),
                Rule::SpaceIndentation => self.find_space_indentation(),
                Rule::MissingPhony => self.find_missing_phony(),
                Rule::DuplicateTarget => self.find_duplicate_targets(),
                Rule::TrailingSpaces => self.find_trailing_spaces(),
                Rule::EofBlankLines => self.find_blank_lines_at_eof(),
            }
            debug!(%rule, found = self.diagnostics.len() - before, "rule finished");
        }

        self.diagnostics
    }

    fn add(&mut self, rule: Rule, position: Position, message: String) {
        let severity = self.config.severity_of(rule);
        match Diagnostic::new(self.source.path(), position, message, severity, rule) {
            Ok(diagnostic) => self.diagnostics.push(diagnostic),
            Err(e) => warn!(%rule, error = %e, "dropping malformed diagnostic"),
        }
    }

    fn add_at_span(&mut self, rule: Rule, span: Span, message: String) {
        match map_to_position(self.source, span) {
            Some(position) => self.add(rule, position, message),
            None => warn!(%rule, ?span, "token span does not fit the source text"),
        }
    }

    /// `$(FOO)` where nothing assigns `FOO`:
    ///
    /// ```make
    /// test:
    /// 	echo $(FOO)
    /// ```
    fn find_undefined_variables(&mut self) {
        let source = self.source;
        let globals = extract::global_variable_names(source, self.tokenizer);

        for span in extract::referenced_variables(source, self.tokenizer) {
            let Some(name) = span.slice(source.text()) else {
                continue;
            };
            if globals.contains(name)
                || extract::is_reserved_variable(name)
                || self.config.is_reserved(name)
            {
                continue;
            }
            self.add_at_span(Rule::UndefinedVariable, span, format!("undefined name '{name}'"));
        }
    }

    /// `$(MAKE) bar` where no rule defines `bar`.
    fn find_undefined_target_calls(&mut self) {
        let targets = extract::target_names(self.source, self.tokenizer);

        for call in rules::recursive_calls(&self.lines) {
            if targets.contains(&call.name) {
                continue;
            }
            let position = Position {
                line: call.line,
                col: call.col,
                end_col: call.end_col,
            };
            self.add(
                Rule::UndefinedTarget,
                position,
                format!("undefined target '{}'", call.name),
            );
        }
    }

    /// make aborts on recipe lines indented with spaces.
    fn find_space_indentation(&mut self) {
        for (line, width) in rules::leading_spaces(&self.lines) {
            let position = Position {
                line,
                col: 0,
                end_col: width,
            };
            self.add(
                Rule::SpaceIndentation,
                position,
                "line should start with tab, not space".to_string(),
            );
        }
    }

    /// A target named like a file or directory next to the Makefile is
    /// never out of date unless declared `.PHONY`.
    fn find_missing_phony(&mut self) {
        let siblings: BTreeSet<String> = match self.probe.sibling_names(self.source.path()) {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "skipping missing .PHONY check");
                return;
            }
        };
        let phony = extract::phony_names(self.source.text());

        for (span, name) in extract::target_tokens(self.source, self.tokenizer) {
            if siblings.contains(name) && !phony.contains(name) {
                self.add_at_span(
                    Rule::MissingPhony,
                    span,
                    "missing .PHONY declaration".to_string(),
                );
            }
        }
    }

    /// Every definition of a target after its first.
    fn find_duplicate_targets(&mut self) {
        let mut seen = BTreeSet::new();

        for (span, name) in extract::target_tokens(self.source, self.tokenizer) {
            if !seen.insert(name) {
                self.add_at_span(
                    Rule::DuplicateTarget,
                    span,
                    "a target with the same name already exists".to_string(),
                );
            }
        }
    }

    fn find_trailing_spaces(&mut self) {
        for (line, col, end_col) in rules::trailing_spaces(&self.lines) {
            self.add(
                Rule::TrailingSpaces,
                Position { line, col, end_col },
                "trailing spaces".to_string(),
            );
        }
    }

    /// One diagnostic per trailing blank line. The `lineno - 2`
    /// placement is kept as is for compatibility with existing hosts.
    fn find_blank_lines_at_eof(&mut self) {
        let blanks = rules::trailing_blank_lines(&self.lines);
        let total = self.lines.len();

        for lineno in total..total + blanks {
            let position = Position {
                line: lineno.saturating_sub(2),
                col: 1,
                end_col: 1,
            };
            self.add(
                Rule::EofBlankLines,
                position,
                "unnecessary empty line at EOF".to_string(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StaticProbe;

    fn run(text: &str) -> Vec<Diagnostic> {
        let source = SourceFile::new("/project/Makefile", text);
        let tokens = tokenize(text);
        Linter::new(&source, &tokens, &StaticProbe::default(), &Config::default()).run()
    }

    fn messages(text: &str) -> Vec<String> {
        run(text).into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn clean_file() {
        assert!(run(".PHONY: all\nall: build\n\nbuild:\n\t$(MAKE) all\n").is_empty());
    }

    #[test]
    fn undefined_name_position() {
        let found = run("hello:\n\techo $(FOO)\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "undefined name 'FOO'");
        assert_eq!(found[0].position(), Position { line: 1, col: 8, end_col: 11 });
    }

    #[test]
    fn declared_and_reserved_names_pass() {
        assert!(run("FOO = 1\nall:\n\techo $(FOO) $(MAKEFILE_LIST) ${CURDIR}\n").is_empty());
    }

    #[test]
    fn eof_blank_line_positions() {
        let found = run("all:\n\techo 1\n\n\n");
        let positions: Vec<_> = found.iter().map(Diagnostic::position).collect();
        assert_eq!(
            positions,
            vec![
                Position { line: 2, col: 1, end_col: 1 },
                Position { line: 3, col: 1, end_col: 1 },
            ]
        );
        assert!(found.iter().all(|d| d.message == "unnecessary empty line at EOF"));
    }

    #[test]
    fn rules_are_independent() {
        let found = messages("all:  \n    echo $(X)\n");
        assert_eq!(
            found,
            vec![
                "undefined name 'X'",
                "line should start with tab, not space",
                "trailing spaces",
            ]
        );
    }
}
