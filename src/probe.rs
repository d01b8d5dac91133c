//! Directory listing used by the missing `.PHONY` check.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Failure to list the directory containing a Makefile.
#[derive(Debug, thiserror::Error)]
#[error("cannot list directory {}: {source}", dir.display())]
pub struct ProbeError {
    pub dir: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Lists the names of entries next to a file.
pub trait DirectoryProbe {
    /// Names of all files and directories in `file`'s parent directory.
    fn sibling_names(&self, file: &Path) -> Result<BTreeSet<String>, ProbeError>;
}

/// Reads the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl DirectoryProbe for FsProbe {
    fn sibling_names(&self, file: &Path) -> Result<BTreeSet<String>, ProbeError> {
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let wrap = |source| ProbeError {
            dir: dir.to_path_buf(),
            source,
        };

        let mut names = BTreeSet::new();
        for entry in fs::read_dir(dir).map_err(wrap)? {
            // non-UTF-8 names can never equal a target token
            if let Ok(name) = entry.map_err(wrap)?.file_name().into_string() {
                names.insert(name);
            }
        }
        Ok(names)
    }
}

/// A fixed listing supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProbe {
    names: BTreeSet<String>,
}

impl StaticProbe {
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl DirectoryProbe for StaticProbe {
    fn sibling_names(&self, _file: &Path) -> Result<BTreeSet<String>, ProbeError> {
        Ok(self.names.clone())
    }
}
