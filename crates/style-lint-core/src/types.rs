//! Core types for lint violations and locations.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Category tag for rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Rules about visual style and formatting.
    Style,
    /// Rules that catch likely mistakes.
    Lint,
    /// Rules about code size and complexity.
    Metrics,
    /// Rules about idiomatic constructs.
    Idiomatic,
    /// Rules about performance pitfalls.
    Performance,
}

/// A version of the linted language, used to gate rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
}

impl LanguageVersion {
    /// The earliest language version any rule supports.
    pub const FIRST: Self = Self::new(1, 0);

    /// The language version the linter currently targets.
    pub const CURRENT: Self = Self::new(6, 0);

    /// Creates a new version.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Source location of a violation.
///
/// `line` and `character` are 1-based and counted in Unicode scalar values,
/// never bytes. A location without a file is used for file-agnostic
/// comparisons: two locations are equal iff their lines and characters match
/// and, when both carry a file, the files match too.
#[derive(Debug, Clone, Default)]
pub struct Location {
    /// File the violation was found in, if any.
    pub file: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: Option<usize>,
    /// Character within the line (1-indexed).
    pub character: Option<usize>,
}

impl Location {
    /// Creates a file-agnostic location.
    #[must_use]
    pub fn new(line: Option<usize>, character: Option<usize>) -> Self {
        Self {
            file: None,
            line,
            character,
        }
    }

    /// Attaches a file to this location.
    #[must_use]
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    /// Returns a copy of this location with the file dropped.
    #[must_use]
    pub fn without_file(&self) -> Self {
        Self {
            file: None,
            line: self.line,
            character: self.character,
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        let files_match = match (&self.file, &other.file) {
            (Some(a), Some(b)) => a == b,
            // A location with no file compares file-agnostically.
            _ => true,
        };
        files_match && self.line == other.line && self.character == other.character
    }
}

impl Eq for Location {}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    /// Total order by `(line, character)`; absent components sort first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.character.cmp(&other.character))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = self
            .file
            .as_ref()
            .map_or_else(|| "<nopath>".to_string(), |p| p.display().to_string());
        write!(
            f,
            "{}:{}:{}",
            file,
            self.line.unwrap_or(1),
            self.character.unwrap_or(1)
        )
    }
}

/// A lint violation found during detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Stable rule identifier (e.g., `"leading-whitespace"`).
    pub identifier: String,
    /// Human-readable rule name (e.g., `"Leading Whitespace"`).
    pub name: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Where the violation was found.
    pub location: Location,
    /// Human-readable reason.
    pub reason: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        severity: Severity,
        location: Location,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            severity,
            location,
            reason: reason.into(),
        }
    }

    /// Returns a copy with the given location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: {} Violation: {} ({})",
            self.location, self.severity, self.name, self.reason, self.identifier
        )
    }
}
