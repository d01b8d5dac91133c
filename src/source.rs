use std::path::{Path, PathBuf};

/// File names the Makefile grammar applies to.
const MAKEFILE_NAMES: &[&str] = &[
    "Makefile",
    "makefile",
    "GNUmakefile",
    "OCamlMakefile",
    "Makefile.am",
    "makefile.am",
    "Makefile.in",
    "makefile.in",
];

const MAKEFILE_EXTENSIONS: &[&str] = &["mk", "mak", "make"];

/// The text of one recipe file plus its derived line index.
///
/// Immutable once built; every scan derives its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    /// Byte offset where each physical line starts.
    line_starts: Vec<usize>,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            path: path.into(),
            text,
            line_starts,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Physical lines, with `\r\n` endings normalised, a leading
    /// byte-order mark dropped and no phantom empty line after a final
    /// newline.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        let text = self.text.strip_prefix('\u{FEFF}').unwrap_or(&self.text);
        text.lines().collect()
    }

    /// Byte offsets of line starts, including a trailing empty line
    /// after a final newline.
    #[must_use]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    /// Whether the file belongs to the Makefile grammar.
    ///
    /// Decided by file name or extension, falling back to a shebang
    /// that runs `make`.
    #[must_use]
    pub fn is_makefile(&self) -> bool {
        let by_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| MAKEFILE_NAMES.contains(&n));
        let by_extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| MAKEFILE_EXTENSIONS.contains(&e));

        by_name || by_extension || self.has_make_shebang()
    }

    fn has_make_shebang(&self) -> bool {
        let first = self.text.lines().next().unwrap_or("");
        first.strip_prefix("#!").is_some_and(|rest| {
            rest.split(|c: char| c.is_whitespace() || c == '/')
                .any(|word| word == "make" || word == "gmake")
        })
    }
}
