//! Name sets derived from a tokenized Makefile.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::source::SourceFile;
use crate::token::{Span, TokenKind, Tokenizer};

/// Variables make defines itself; never reported as undefined.
///
/// See <https://www.gnu.org/software/make/manual/html_node/Special-Variables.html>.
pub const RESERVED_VARIABLES: &[&str] = &[
    ".DEFAULT_GOAL",
    ".EXTRA_PREREQS",
    ".FEATURES",
    ".INCLUDE_DIRS",
    ".LOADED",
    ".RECIPEPREFIX",
    ".SHELLFLAGS",
    ".VARIABLES",
    "CURDIR",
    "MAKE",
    "MAKECMDGOALS",
    "MAKEFILE_LIST",
    "MAKEFLAGS",
    "MAKELEVEL",
    "MAKE_HOST",
    "MAKE_RESTARTS",
    "MAKE_TERMERR",
    "MAKE_TERMOUT",
    "MAKE_VERSION",
    "SHELL",
];

/// The `.PHONY` directive, which the grammar tokenizes like a target.
pub const PHONY_MARKER: &str = ".PHONY";

/// What `${*}` tokenizes to; not a real variable.
pub const ALL_ARGUMENTS: &str = "*";

static PHONY_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\.PHONY[ \t]*:([^\n#]*)").expect("phony pattern is valid")
});

#[must_use]
pub fn is_reserved_variable(name: &str) -> bool {
    RESERVED_VARIABLES.contains(&name)
}

/// Spans of `kind` paired with the text they cover. Spans that do not
/// fit the text are dropped.
fn spans_with_text<'a>(
    source: &'a SourceFile,
    tokenizer: &dyn Tokenizer,
    kind: TokenKind,
) -> impl Iterator<Item = (Span, &'a str)> {
    tokenizer
        .find_spans(kind)
        .into_iter()
        .filter_map(move |span| span.slice(source.text()).map(|text| (span, text)))
}

/// Names assigned anywhere in the file, trimmed.
#[must_use]
pub fn global_variable_names(source: &SourceFile, tokenizer: &dyn Tokenizer) -> BTreeSet<String> {
    spans_with_text(source, tokenizer, TokenKind::GlobalVariableDecl)
        .map(|(_, text)| text.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Target tokens in file order, without the `.PHONY` directive.
#[must_use]
pub fn target_tokens<'a>(
    source: &'a SourceFile,
    tokenizer: &dyn Tokenizer,
) -> Vec<(Span, &'a str)> {
    spans_with_text(source, tokenizer, TokenKind::TargetName)
        .filter(|(_, text)| !text.is_empty() && *text != PHONY_MARKER)
        .collect()
}

#[must_use]
pub fn target_names(source: &SourceFile, tokenizer: &dyn Tokenizer) -> BTreeSet<String> {
    target_tokens(source, tokenizer)
        .into_iter()
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Every name listed in a `.PHONY:` line of the raw text.
#[must_use]
pub fn phony_names(text: &str) -> BTreeSet<String> {
    PHONY_DECLARATION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .flat_map(|list| list.as_str().split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Variable reference spans in file order, minus the `${*}` sentinel.
#[must_use]
pub fn referenced_variables(source: &SourceFile, tokenizer: &dyn Tokenizer) -> Vec<Span> {
    spans_with_text(source, tokenizer, TokenKind::VariableReference)
        .filter(|(_, text)| *text != ALL_ARGUMENTS)
        .map(|(span, _)| span)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::token::Token;

    fn source(text: &str) -> (SourceFile, Vec<Token>) {
        (SourceFile::new("Makefile", text), tokenize(text))
    }

    #[test]
    fn target_names_skip_phony_marker() {
        let (src, tokens) = source(
            "\nhello1:\n\techo 1\n\nhello_1:\n\techo 1\n\n_hello1:\n\techo 1\n\n\
             _hello-1:\n\techo 1\n\n1hello:  # valid\n\techo 1\n.PHONY: hello1\n",
        );
        let names = target_names(&src, &tokens);
        let expected: BTreeSet<String> = ["hello1", "hello_1", "_hello1", "_hello-1", "1hello"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn indented_globals_are_trimmed() {
        let (src, tokens) = source("FOO = 1\nifdef X\n  BAR = 1\nendif\n");
        let names = global_variable_names(&src, &tokens);
        assert!(names.contains("FOO"));
        assert!(names.contains("BAR"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn phony_names_union_across_lines() {
        let names = phony_names(".PHONY: hello1\nhello1:\n\n.PHONY: _hello1 other # why\n");
        let expected: BTreeSet<String> = ["hello1", "_hello1", "other"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn empty_phony_line_contributes_nothing() {
        assert!(phony_names(".PHONY:\nall:\n").is_empty());
    }

    #[test]
    fn phony_mention_mid_line_ignored() {
        assert!(phony_names("X = .PHONY: nope\n").is_empty());
    }

    #[test]
    fn sentinel_not_referenced() {
        let (src, tokens) = source("a:\n\techo $(FOO) ${BAR} ${*}\n");
        let names: Vec<_> = referenced_variables(&src, &tokens)
            .into_iter()
            .map(|s| &src.text()[s.range()])
            .collect();
        assert_eq!(names, vec!["FOO", "BAR"]);
    }

    #[test]
    fn reserved_names() {
        assert!(is_reserved_variable("MAKE"));
        assert!(is_reserved_variable("MAKEFILE_LIST"));
        assert!(!is_reserved_variable("make"));
    }
}
