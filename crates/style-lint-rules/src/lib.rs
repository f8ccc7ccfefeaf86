//! # style-lint-rules
//!
//! Built-in style rules for style-lint.
//!
//! ## Available Rules
//!
//! | Identifier | Name | Correctable |
//! |------------|------|-------------|
//! | `leading-whitespace` | Leading Whitespace | yes |
//! | `vertical-whitespace-between-cases` | Vertical Whitespace Between Cases | yes |
//!
//! Every rule declares its own example tables; the full test matrix is
//! derived from them by `style-lint-harness` in this crate's integration
//! tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod leading_whitespace;
mod vertical_whitespace_between_cases;

pub use leading_whitespace::LeadingWhitespace;
pub use vertical_whitespace_between_cases::VerticalWhitespaceBetweenCases;
