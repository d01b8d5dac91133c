//! Stand-in lexer classifying Makefile text into declarations, target
//! names, and variable references.
//!
//! This is a line-oriented state machine, not a Makefile parser. It
//! mirrors what a syntax-highlighting grammar would classify and is
//! good enough for the linter to run without a host-supplied tokenizer.

use std::sync::LazyLock;

use regex::Regex;

use crate::token::{Span, Token, TokenKind, Tokenizer};

/// `NAME = value` and every other assignment flavour, with optional
/// `export`/`override`/`private` modifiers.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t]*(?:(?:export|override|private)[ \t]+)*([^\s:#=+?!$(){}]+)[ \t]*(?:=|:=|::=|:::=|\?=|\+=|!=)",
    )
    .expect("assignment pattern is valid")
});

/// `define NAME` opening a multi-line variable.
static DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:(?:export|override|private)[ \t]+)*define[ \t]+([^\s:#=+?!$(){}]+)")
        .expect("define pattern is valid")
});

/// Lines starting with these words are make directives, never rules.
const DIRECTIVES: &[&str] = &[
    "include", "-include", "sinclude", "vpath", "export", "unexport", "undefine", "endef",
];

/// Conditional directives. They may sit between recipe lines without
/// ending the recipe.
const CONDITIONALS: &[&str] = &["ifeq", "ifneq", "ifdef", "ifndef", "else", "endif"];

/// Tokenize Makefile text.
///
/// Never fails: text the lexer does not understand simply yields no
/// tokens.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

impl Tokenizer for Vec<Token> {
    fn find_spans(&self, kind: TokenKind) -> Vec<Span> {
        self.iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.span)
            .collect()
    }
}

struct Lexer<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    /// Tab-indented lines after a rule line are recipe lines.
    in_recipe: bool,
    /// Inside a `define ... endef` body.
    in_define: bool,
    /// Previous line ended with a backslash.
    continued: bool,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: Vec::new(),
            in_recipe: false,
            in_define: false,
            continued: false,
        }
    }

    fn tokenize(mut self) -> Vec<Token> {
        let input = self.input;
        let mut offset = if input.starts_with('\u{FEFF}') { 3 } else { 0 };

        while offset < input.len() {
            let end = input[offset..]
                .find('\n')
                .map_or(input.len(), |i| offset + i);
            let line = input[offset..end].strip_suffix('\r').unwrap_or(&input[offset..end]);
            self.lex_line(offset, line);
            offset = end + 1;
        }

        self.tokens
    }

    fn lex_line(&mut self, offset: usize, line: &str) {
        let continued = self.continued;
        self.continued = line.ends_with('\\');

        if self.in_define {
            if first_word(line.trim_start()) == "endef" {
                self.in_define = false;
            }
            return;
        }

        // recipe bodies and continuations are shell text: only
        // references are interesting there
        if continued || (self.in_recipe && line.starts_with('\t')) {
            self.scan_references(offset, line);
            return;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }

        let code = strip_comment(line);
        self.scan_references(offset, code);

        if CONDITIONALS.contains(&first_word(trimmed)) {
            return;
        }
        self.in_recipe = false;

        if let Some(caps) = DEFINE.captures(code) {
            if let Some(name) = caps.get(1) {
                self.push(TokenKind::GlobalVariableDecl, offset + name.start(), offset + name.end());
            }
            self.in_define = true;
            return;
        }

        if let Some(caps) = ASSIGNMENT.captures(code) {
            if let Some(name) = caps.get(1) {
                self.push(TokenKind::GlobalVariableDecl, offset + name.start(), offset + name.end());
            }
            return;
        }

        if DIRECTIVES.contains(&first_word(trimmed)) {
            return;
        }

        if let Some(colon) = rule_colon(code) {
            self.push_targets(offset, &code[..colon]);
            self.in_recipe = true;
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        if let Some(span) = Span::new(start, end) {
            self.tokens.push(Token { kind, span });
        }
    }

    /// Emit one target token per word of a rule head. Computed names
    /// (anything containing `$`) are skipped.
    fn push_targets(&mut self, offset: usize, head: &str) {
        let bytes = head.as_bytes();
        let mut depth = 0usize;
        let mut word_start: Option<usize> = None;

        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'(' | b'{' if i > 0 && bytes[i - 1] == b'$' => depth += 1,
                b')' | b'}' if depth > 0 => depth -= 1,
                _ => {}
            }
            if depth == 0 && b.is_ascii_whitespace() {
                if let Some(start) = word_start.take() {
                    self.push_target_word(offset, head, start, i);
                }
            } else if word_start.is_none() {
                word_start = Some(i);
            }
        }
        if let Some(start) = word_start {
            self.push_target_word(offset, head, start, bytes.len());
        }
    }

    fn push_target_word(&mut self, offset: usize, head: &str, start: usize, end: usize) {
        if !head[start..end].contains('$') {
            self.push(TokenKind::TargetName, offset + start, offset + end);
        }
    }

    /// Find `$(NAME)`, `${NAME}` and `$(NAME:a=b)` references.
    ///
    /// Function calls like `$(shell ...)` are not references, but
    /// scanning resumes inside them so nested references are found.
    fn scan_references(&mut self, offset: usize, text: &str) {
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'$' {
                i += 1;
                continue;
            }
            match bytes.get(i + 1) {
                Some(b'$') => i += 2,
                Some(&open) if open == b'(' || open == b'{' => {
                    let close = if open == b'(' { b')' } else { b'}' };
                    let start = i + 2;
                    let mut end = start;
                    while end < bytes.len() && is_name_byte(bytes[end]) {
                        end += 1;
                    }
                    let name = &text[start..end];
                    let terminated = matches!(bytes.get(end), Some(&c) if c == close || c == b':');
                    if terminated && is_reference_name(name) {
                        self.push(TokenKind::VariableReference, offset + start, offset + end);
                    }
                    i = start;
                }
                _ => i += 1,
            }
        }
    }
}

const fn is_name_byte(b: u8) -> bool {
    !matches!(
        b,
        b' ' | b'\t' | b'$' | b'(' | b')' | b'{' | b'}' | b':' | b',' | b'=' | b'#'
    )
}

/// Automatic variables (`$(@D)`, `$(<F)`, `$(*F)` ...) are never
/// references to user variables. A lone `*` is kept; the extraction
/// layer treats it as the all-arguments sentinel.
fn is_reference_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    if matches!(first, '@' | '<' | '^' | '?' | '%' | '+' | '|') {
        return false;
    }
    !(first == '*' && name.len() > 1)
}

/// Text before the first unescaped `#`.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || bytes[i - 1] != b'\\') {
            return &line[..i];
        }
    }
    line
}

fn first_word(text: &str) -> &str {
    text.split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("")
}

/// Position of the colon separating a rule's targets from its
/// prerequisites. Colons inside `$(...)` do not count, and `:=` is an
/// assignment, not a rule.
fn rule_colon(code: &str) -> Option<usize> {
    let bytes = code.as_bytes();
    let mut depth = 0usize;
    let mut colon = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'{' if i > 0 && bytes[i - 1] == b'$' => depth += 1,
            b')' | b'}' if depth > 0 => depth -= 1,
            b'=' if depth == 0 => return None,
            b':' if depth == 0 => {
                colon = Some(i);
                break;
            }
            _ => {}
        }
    }

    let colon = colon?;
    let rest = &code[colon + 1..];
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    if rest.starts_with('=') {
        return None;
    }
    if code[..colon].trim().is_empty() {
        return None;
    }
    Some(colon)
}
