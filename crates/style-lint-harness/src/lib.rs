//! Example-driven verification harness for style-lint rules.
//!
//! A rule declares its behavior as example tables on its
//! [`RuleDescription`](style_lint_core::RuleDescription); [`verify_rule`]
//! expands those tables into the full battery of lint and correction checks
//! and reports every failure with the provenance of the example that defined
//! the expectation.
//!
//! ```ignore
//! #[test]
//! fn my_rule() {
//!     style_lint_harness::verify_rule(&MyRule::default());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fixture;
mod render;
mod verify;

pub use fixture::Fixture;
pub use render::{render_locations, render_violations};
pub use verify::{verify_rule, verify_rule_with, VerifyConfig};
