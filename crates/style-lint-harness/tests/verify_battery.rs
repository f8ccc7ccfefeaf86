//! Runs the full battery over a small correctable rule to exercise every
//! harness path end to end.

use regex::Regex;
use style_lint_core::{
    Buffer, ConfigError, Example, PatternCorrection, Rule, RuleDescription, RuleKind, Severity,
    SeverityConfig, Violation,
};
use style_lint_harness::{verify_rule, verify_rule_with, VerifyConfig};

const IDENTIFIER: &str = "no-tabs";

#[derive(Debug, Clone)]
struct NoTabs {
    config: SeverityConfig,
    pattern: Regex,
}

impl NoTabs {
    fn new() -> Self {
        Self {
            config: SeverityConfig::default(),
            pattern: Regex::new("\t").unwrap_or_else(|e| panic!("pattern: {e}")),
        }
    }

    fn pattern_correction(&self) -> PatternCorrection<'_> {
        PatternCorrection::new(&self.pattern, "    ")
    }
}

impl Rule for NoTabs {
    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }

    fn severity(&self) -> Severity {
        self.config.severity
    }

    fn configure(&mut self, config: &toml::Value) -> Result<(), ConfigError> {
        self.config.apply(IDENTIFIER, config)
    }

    fn description(&self) -> RuleDescription {
        RuleDescription::new(IDENTIFIER, "No Tabs", "Indent with spaces, not tabs", RuleKind::Style)
            .with_aliases(vec!["legacy-no-tabs"])
            .with_non_triggering(vec![Example::new("let x = 1\n")])
            .with_triggering(vec![Example::new("let x =↓\t1\n")])
            .with_corrections(vec![(
                Example::new("let x =↓\t1\n"),
                Example::new("let x =    1\n"),
            )])
    }

    fn detect(&self, buffer: &Buffer) -> Vec<Violation> {
        self.pattern_correction()
            .violation_ranges(buffer)
            .iter()
            .map(|range| {
                Violation::new(
                    IDENTIFIER,
                    "No Tabs",
                    self.severity(),
                    buffer.location_at(buffer.char_offset(range.start)),
                    "Indent with spaces, not tabs",
                )
            })
            .collect()
    }

    fn correct(&self, buffer: &mut Buffer) -> usize {
        self.pattern_correction()
            .correct(buffer, &self.description().all_identifiers())
    }
}

#[test]
fn no_tabs_passes_the_full_battery() {
    verify_rule(&NoTabs::new());
}

#[test]
fn battery_honors_skip_flags() {
    let config = VerifyConfig {
        skip_comment_tests: true,
        skip_string_tests: true,
        skip_disable_command_tests: true,
        test_multi_byte_offsets: false,
        test_shebang: false,
        ..VerifyConfig::default()
    };
    verify_rule_with(&NoTabs::new(), &config);
}

/// A rule whose triggering example never violates must fail the battery.
#[derive(Debug, Clone)]
struct Inert;

impl Rule for Inert {
    fn identifier(&self) -> &'static str {
        "inert"
    }

    fn description(&self) -> RuleDescription {
        RuleDescription::new("inert", "Inert", "Never fires", RuleKind::Lint)
            .with_triggering(vec![Example::new("let x = 1\n")])
    }

    fn detect(&self, _buffer: &Buffer) -> Vec<Violation> {
        Vec::new()
    }
}

#[test]
#[should_panic(expected = "failed verification")]
fn battery_reports_a_triggering_example_that_does_not_violate() {
    verify_rule(&Inert);
}

#[test]
#[should_panic(expected = "focused examples are forbidden")]
fn forbidding_focus_fails_focused_examples() {
    #[derive(Debug, Clone)]
    struct Focused;

    impl Rule for Focused {
        fn identifier(&self) -> &'static str {
            "focused"
        }

        fn description(&self) -> RuleDescription {
            RuleDescription::new("focused", "Focused", "Demo", RuleKind::Lint)
                .with_non_triggering(vec![Example::new("let x = 1\n").focus()])
        }

        fn detect(&self, _buffer: &Buffer) -> Vec<Violation> {
            Vec::new()
        }
    }

    let config = VerifyConfig {
        forbid_focused: true,
        ..VerifyConfig::default()
    };
    verify_rule_with(&Focused, &config);
}
