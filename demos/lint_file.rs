//! Lint a Makefile from disk and print its diagnostics.
//!
//! ```text
//! cargo run --example lint_file -- path/to/Makefile
//! ```

use std::process::ExitCode;

use makelint_rs::{Config, SourceFile, lint};

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: lint_file <Makefile>");
        return ExitCode::FAILURE;
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let found = lint(&SourceFile::new(&path, text), &Config::default());
    for d in &found {
        println!("{d}");
    }

    if found.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
