#![allow(dead_code)]

use makelint_rs::{Config, Diagnostic, Linter, SourceFile, StaticProbe, tokenize};

/// Install a test-writer subscriber once so `RUST_LOG` works in tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Lint `text` as `/project/Makefile` with the given sibling names.
pub fn lint_with_siblings(text: &str, siblings: &[&str]) -> Vec<Diagnostic> {
    init_tracing();
    let source = SourceFile::new("/project/Makefile", text);
    let tokens = tokenize(source.text());
    let probe = StaticProbe::new(siblings.iter().copied());
    Linter::new(&source, &tokens, &probe, &Config::default()).run()
}

/// Lint `text` with no sibling files.
pub fn lint(text: &str) -> Vec<Diagnostic> {
    lint_with_siblings(text, &[])
}

pub fn messages(found: &[Diagnostic]) -> Vec<&str> {
    found.iter().map(|d| d.message.as_str()).collect()
}
