//! Maps token spans to zero-based line/column positions.
//!
//! Columns count characters rather than bytes so they line up with
//! what an editor shows.

use crate::diagnostic::Position;
use crate::source::SourceFile;
use crate::token::Span;

const BOM: char = '\u{FEFF}';

/// Convert a span into `(line, col, end_col)`.
///
/// Returns `None` for spans outside the text or not on character
/// boundaries. A span is assumed to stay on one line.
#[must_use]
pub fn map_to_position(source: &SourceFile, span: Span) -> Option<Position> {
    let text = source.text();
    let covered = span.slice(text)?;
    let starts = source.line_starts();

    // index of the last line start <= span.start
    let line = starts.partition_point(|&s| s <= span.start).saturating_sub(1);
    let mut line_start = starts.get(line).copied().unwrap_or(0);
    if line == 0 && text.starts_with(BOM) {
        line_start = BOM.len_utf8().min(span.start);
    }

    let col = text.get(line_start..span.start)?.chars().count();
    let end_col = col + covered.chars().count();

    Some(Position { line, col, end_col })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(text: &str, start: usize, end: usize) -> Option<Position> {
        map_to_position(&SourceFile::new("Makefile", text), Span { start, end })
    }

    #[test]
    fn first_line() {
        assert_eq!(
            pos("hello:\n", 0, 5),
            Some(Position {
                line: 0,
                col: 0,
                end_col: 5
            })
        );
    }

    #[test]
    fn later_line_counts_tab_as_one_column() {
        let text = "hello:\n\techo $(FOO)\n";
        let start = text.find("FOO").unwrap_or_default();
        assert_eq!(
            pos(text, start, start + 3),
            Some(Position {
                line: 1,
                col: 8,
                end_col: 11
            })
        );
    }

    #[test]
    fn multibyte_characters_count_once() {
        let text = "# héllo\nX = $(Ü)\n";
        let start = text.find('Ü').unwrap_or_default();
        assert_eq!(
            pos(text, start, start + 'Ü'.len_utf8()),
            Some(Position {
                line: 1,
                col: 6,
                end_col: 7
            })
        );
    }

    #[test]
    fn span_at_line_start() {
        let text = "a:\nb:\n";
        assert_eq!(pos(text, 3, 4).map(|p| (p.line, p.col)), Some((1, 0)));
    }

    #[test]
    fn byte_order_mark_is_not_a_column() {
        let text = "\u{FEFF}dirname:\n";
        assert_eq!(
            pos(text, 3, 10),
            Some(Position {
                line: 0,
                col: 0,
                end_col: 7
            })
        );
    }

    #[test]
    fn out_of_bounds_is_none() {
        assert_eq!(pos("a:\n", 2, 40), None);
    }
}
