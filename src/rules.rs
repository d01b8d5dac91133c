//! Line-oriented pattern checks.
//!
//! Each scanner visits every line once. They work on raw lines rather
//! than tokens, so their columns are computed here instead of by the
//! position mapper.

use std::sync::LazyLock;

use regex::Regex;

/// A recipe line running `$(MAKE)` / `${MAKE}` with optional flags and
/// then a target name. Only the first target on a line is captured.
static RECURSIVE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\t\$[{(]\s*MAKE\s*[})]
        \s+
        (?:-[a-zA-Z]\s+          # -C
          |--[a-z-]+\s+          # --keep-going
          |--[a-z-]+=.*?\s+      # --jobs=3
        )*
        ([_A-Za-z0-9][A-Za-z0-9_-]+)",
    )
    .expect("recursive call pattern is valid")
});

/// `$(MAKE) <name>` found on a recipe line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursiveCall {
    pub line: usize,
    pub name: String,
    pub col: usize,
    pub end_col: usize,
}

/// Recursive make invocations, at most one per line.
#[must_use]
pub fn recursive_calls(lines: &[&str]) -> Vec<RecursiveCall> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line, text)| {
            let name = RECURSIVE_CALL.captures(text)?.get(1)?;
            let col = char_column(text, name.start());
            Some(RecursiveCall {
                line,
                name: name.as_str().to_string(),
                col,
                end_col: col + name.as_str().chars().count(),
            })
        })
        .collect()
}

/// `(line, width)` for each line starting with a space, where `width`
/// is the length of its leading whitespace.
#[must_use]
pub fn leading_spaces(lines: &[&str]) -> Vec<(usize, usize)> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, text)| text.starts_with(' '))
        .map(|(line, text)| {
            let body = text.trim_start();
            (line, text.chars().count() - body.chars().count())
        })
        .collect()
}

/// `(line, start, end)` covering the trailing spaces of each line.
#[must_use]
pub fn trailing_spaces(lines: &[&str]) -> Vec<(usize, usize, usize)> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, text)| text.ends_with(' '))
        .map(|(line, text)| {
            let end = text.chars().count();
            let start = text.trim_end_matches(' ').chars().count();
            (line, start, end)
        })
        .collect()
}

/// Number of blank or whitespace-only lines at the end.
#[must_use]
pub fn trailing_blank_lines(lines: &[&str]) -> usize {
    lines
        .iter()
        .rev()
        .take_while(|text| text.trim().is_empty())
        .count()
}

fn char_column(text: &str, byte: usize) -> usize {
    text.get(..byte).map_or(0, |prefix| prefix.chars().count())
}
