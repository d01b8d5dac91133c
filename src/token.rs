use std::ops::Range;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span, rejecting `start > end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Option<Self> {
        if start > end {
            None
        } else {
            Some(Self { start, end })
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Text covered by this span, or `None` if it is out of bounds
    /// or splits a character.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.range())
    }
}

/// Lexical categories a tokenizer classifies substrings into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Name bound by a variable assignment or `define`.
    GlobalVariableDecl,
    /// Name on the left of a rule's colon.
    TargetName,
    /// Name inside `$(...)` or `${...}`.
    VariableReference,
}

impl TokenKind {
    pub const ALL: [Self; 3] = [
        Self::GlobalVariableDecl,
        Self::TargetName,
        Self::VariableReference,
    ];
}

/// A classified span of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lexical classification service bound to one file's text.
///
/// The linter depends on this capability rather than on a concrete
/// lexer so a host with its own grammar engine can supply spans.
pub trait Tokenizer {
    /// All spans of the given category, in file order.
    fn find_spans(&self, kind: TokenKind) -> Vec<Span>;
}
