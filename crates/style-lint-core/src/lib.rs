//! # style-lint-core
//!
//! Core framework for style linting of structured source text.
//!
//! This crate provides the foundational traits and types for building
//! style linters with automatic correction. It includes:
//!
//! - [`Rule`] trait for detect/correct lint rules
//! - [`RuleDescription`] and [`Example`] for declarative rule self-description
//! - [`Buffer`] for mutable source text with a line index and syntax map
//! - [`PatternCorrection`] for offset-stable multi-edit correction
//! - [`Linter`] for driving rules with disable-directive handling
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use style_lint_core::{Buffer, Linter, Rule};
//!
//! let rule = MyRule::new();
//! let mut buffer = Buffer::new("switch x {\ncase 1:\n    work()\n}\n");
//! let violations = Linter::new(vec![&rule]).lint(&buffer);
//! let corrected = Linter::new(vec![&rule]).correct(&mut buffer);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod classifier;
mod config;
mod correction;
mod directives;
mod example;
mod linter;
mod rule;
mod types;

pub use buffer::{Buffer, Line, WriteError};
pub use classifier::{AllCode, SourceClassifier, SyntaxClassifier, SyntaxKind, SyntaxSpan};
pub use config::{severity_value, ConfigError, SeverityConfig};
pub use correction::{apply_edits, Edit, PatternCorrection};
pub use directives::{
    DisableDirective, DisabledRegions, ALL_IDENTIFIER, DISABLE_PREFIX, ENABLE_PREFIX,
    SUPERFLUOUS_DISABLE_IDENTIFIER,
};
pub use example::{strip_markers, Example, VIOLATION_MARKER};
pub use linter::Linter;
pub use rule::{Rule, RuleBox, RuleDescription};
pub use types::{LanguageVersion, Location, RuleKind, Severity, Violation};
