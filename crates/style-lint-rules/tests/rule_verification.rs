//! Runs every built-in rule through the full verification battery.

use style_lint_harness::verify_rule;
use style_lint_rules::{LeadingWhitespace, VerticalWhitespaceBetweenCases};

#[test]
fn leading_whitespace() {
    verify_rule(&LeadingWhitespace::new());
}

#[test]
fn vertical_whitespace_between_cases() {
    verify_rule(&VerticalWhitespaceBetweenCases::new());
}
