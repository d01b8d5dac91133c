//! Which rules run, at what severity, and which extra variable names
//! count as always defined.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::diagnostic::Severity;

/// Identifies one check of the linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// `$(NAME)` where `NAME` is never assigned.
    UndefinedVariable,
    /// `$(MAKE) target` where `target` has no rule.
    UndefinedTarget,
    /// Line indented with spaces instead of a tab.
    SpaceIndentation,
    /// Target shadowed by a file on disk but not declared `.PHONY`.
    MissingPhony,
    /// Second definition of the same target.
    DuplicateTarget,
    /// Spaces at the end of a line.
    TrailingSpaces,
    /// Blank lines at the end of the file.
    EofBlankLines,
}

impl Rule {
    /// Every rule, in execution order.
    pub const ALL: [Self; 7] = [
        Self::UndefinedVariable,
        Self::UndefinedTarget,
        Self::SpaceIndentation,
        Self::MissingPhony,
        Self::DuplicateTarget,
        Self::TrailingSpaces,
        Self::EofBlankLines,
    ];

    /// Stable kebab-case identifier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UndefinedVariable => "undefined-variable",
            Self::UndefinedTarget => "undefined-target",
            Self::SpaceIndentation => "space-indentation",
            Self::MissingPhony => "missing-phony",
            Self::DuplicateTarget => "duplicate-target",
            Self::TrailingSpaces => "trailing-spaces",
            Self::EofBlankLines => "eof-blank-lines",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error produced when reading configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Rule code that names no known rule.
    #[error("unknown rule: {0}")]
    UnknownRule(String),
}

impl FromStr for Rule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.code() == s)
            .ok_or_else(|| ConfigError::UnknownRule(s.to_string()))
    }
}

/// Linter settings.
///
/// The default runs every rule at `Severity::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    disabled: BTreeSet<Rule>,
    severities: BTreeMap<Rule, Severity>,
    reserved: BTreeSet<String>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a rule off.
    #[must_use]
    pub fn disable(mut self, rule: Rule) -> Self {
        self.disabled.insert(rule);
        self
    }

    /// Report a rule's diagnostics at the given severity.
    #[must_use]
    pub fn severity(mut self, rule: Rule, severity: Severity) -> Self {
        self.severities.insert(rule, severity);
        self
    }

    /// Treat a variable name as always defined, e.g. one that comes
    /// from the environment.
    #[must_use]
    pub fn reserve(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.reserved.insert(name.to_string());
        }
        self
    }

    #[must_use]
    pub fn is_enabled(&self, rule: Rule) -> bool {
        !self.disabled.contains(&rule)
    }

    #[must_use]
    pub fn severity_of(&self, rule: Rule) -> Severity {
        self.severities.get(&rule).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_everything() {
        let config = Config::default();
        for rule in Rule::ALL {
            assert!(config.is_enabled(rule));
            assert_eq!(config.severity_of(rule), Severity::Error);
        }
    }

    #[test]
    fn builder_chain() {
        let config = Config::new()
            .disable(Rule::TrailingSpaces)
            .severity(Rule::EofBlankLines, Severity::Warning)
            .reserve(" HOME ")
            .reserve("");
        assert!(!config.is_enabled(Rule::TrailingSpaces));
        assert!(config.is_enabled(Rule::MissingPhony));
        assert_eq!(config.severity_of(Rule::EofBlankLines), Severity::Warning);
        assert!(config.is_reserved("HOME"));
        assert!(!config.is_reserved(""));
    }

    #[test]
    fn rule_codes_parse() {
        for rule in Rule::ALL {
            assert_eq!(rule.code().parse::<Rule>(), Ok(rule));
        }
        assert_eq!(
            "no-such-rule".parse::<Rule>(),
            Err(ConfigError::UnknownRule("no-such-rule".to_string()))
        );
    }
}
