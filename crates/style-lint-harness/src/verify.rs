//! The example-driven rule verification battery.
//!
//! [`verify_rule`] expands a rule's declarative example tables into the full
//! test matrix: clean and variant lint runs, marker/location pairing,
//! corrections with idempotence, disable-command interaction, and severity
//! reconfiguration. Failures are accumulated per example and raised as a
//! single panic once the whole battery has run, so one broken example never
//! hides another.

use style_lint_core::{
    severity_value, Buffer, Example, Linter, Location, Rule, RuleDescription, Severity, Violation,
    DISABLE_PREFIX, SUPERFLUOUS_DISABLE_IDENTIFIER,
};
use tracing::debug;

use crate::fixture::Fixture;
use crate::render::{render_locations, render_violations};

const EMOJI_PREFIX: &str = "/* 👨‍👩‍👧‍👦👨‍👩‍👧‍👦👨‍👩‍👧‍👦 */\n";
const SHEBANG_PREFIX: &str = "#!/usr/bin/env swift\n";

/// Knobs for [`verify_rule_with`]. The defaults run the full battery with
/// the expectation that comments and strings never violate.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Configuration applied to the rule for examples that carry none.
    pub configuration: Option<toml::Value>,
    /// Whether triggering code wrapped in a comment must stop violating.
    pub comment_doesnt_violate: bool,
    /// Whether triggering code wrapped in a string literal must stop
    /// violating.
    pub string_doesnt_violate: bool,
    /// Skips the comment-wrapping variants entirely.
    pub skip_comment_tests: bool,
    /// Skips the string-wrapping variants entirely.
    pub skip_string_tests: bool,
    /// Skips the disable-command variants entirely.
    pub skip_disable_command_tests: bool,
    /// Runs the multi-byte comment prefix variants.
    pub test_multi_byte_offsets: bool,
    /// Runs the shebang prefix variants.
    pub test_shebang: bool,
    /// Treats any focused example as a failure, for non-development runs.
    pub forbid_focused: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            configuration: None,
            comment_doesnt_violate: true,
            string_doesnt_violate: true,
            skip_comment_tests: false,
            skip_string_tests: false,
            skip_disable_command_tests: false,
            test_multi_byte_offsets: true,
            test_shebang: true,
            forbid_focused: false,
        }
    }
}

/// Runs the full verification battery over `rule` with default settings.
///
/// # Panics
///
/// Panics with the accumulated failure report when any battery check fails.
pub fn verify_rule<R: Rule + Clone>(rule: &R) {
    verify_rule_with(rule, &VerifyConfig::default());
}

/// Runs the full verification battery over `rule`.
///
/// # Panics
///
/// Panics with the accumulated failure report when any battery check fails.
pub fn verify_rule_with<R: Rule + Clone>(rule: &R, config: &VerifyConfig) {
    let description = rule.description();
    if description.min_version > style_lint_core::LanguageVersion::CURRENT {
        debug!(
            rule = description.identifier,
            min_version = %description.min_version,
            "skipping battery, rule requires a newer language version"
        );
        return;
    }

    let mut battery = Battery::default();
    let tables = Tables::focused(&description, config.forbid_focused, &mut battery);
    let on_disk = description.requires_file_on_disk;

    let disable_commands: Vec<String> = if config.skip_disable_command_tests {
        Vec::new()
    } else {
        description
            .all_identifiers()
            .iter()
            .map(|identifier| format!("// {DISABLE_PREFIX} {identifier}\n"))
            .collect()
    };

    verify_examples(rule, config, &tables.triggering, &tables.non_triggering, on_disk, &mut battery);

    if config.test_multi_byte_offsets {
        let triggers = prefixed(&tables.triggering, EMOJI_PREFIX);
        let non_triggers = prefixed(&tables.non_triggering, EMOJI_PREFIX);
        verify_examples(rule, config, &triggers, &non_triggers, on_disk, &mut battery);
    }

    if config.test_shebang {
        let triggers = prefixed(&tables.triggering, SHEBANG_PREFIX);
        let non_triggers = prefixed(&tables.non_triggering, SHEBANG_PREFIX);
        verify_examples(rule, config, &triggers, &non_triggers, on_disk, &mut battery);
    }

    if !config.skip_comment_tests {
        verify_wrapped(
            rule,
            config,
            &tables.triggering,
            on_disk,
            &mut battery,
            Example::test_wrapping_in_comment,
            |code| format!("/*\n  {code}\n */"),
            config.comment_doesnt_violate,
            "comment",
        );
    }

    if !config.skip_string_tests {
        verify_wrapped(
            rule,
            config,
            &tables.triggering,
            on_disk,
            &mut battery,
            Example::test_wrapping_in_string,
            |code| format!("\"{}\"", code.replace('\n', "\\n")),
            config.string_doesnt_violate,
            "string literal",
        );
    }

    for command in &disable_commands {
        verify_disable_command(rule, config, &tables, command, on_disk, &mut battery);
    }

    verify_severity_override(rule, config, &tables.triggering, on_disk, &mut battery);

    for (before, after) in &tables.corrections {
        verify_correction(rule, config, before, after, on_disk, &mut battery);
        if config.test_multi_byte_offsets && before.test_multi_byte_offsets() {
            verify_correction(
                rule,
                config,
                &prefix(before, EMOJI_PREFIX),
                &prefix(after, EMOJI_PREFIX),
                on_disk,
                &mut battery,
            );
        }
    }

    // Non-triggering examples must come out of `correct` untouched.
    for example in &tables.non_triggering {
        verify_correction(rule, config, example, example, on_disk, &mut battery);
        if config.test_multi_byte_offsets && example.test_multi_byte_offsets() {
            let shifted = prefix(example, EMOJI_PREFIX);
            verify_correction(rule, config, &shifted, &shifted, on_disk, &mut battery);
        }
    }

    // A disable command ahead of a correctable example blocks the edits.
    for (before, _) in &tables.corrections {
        for command in &disable_commands {
            let (clean, _) = before.strip_markers();
            let pinned = before.with_code(format!("{command}{clean}"));
            verify_correction(rule, config, &pinned, &pinned, on_disk, &mut battery);
        }
    }

    battery.finish(description.identifier);
}

/// Accumulated battery failures, each tagged with the provenance of the
/// example that produced it.
#[derive(Debug, Default)]
struct Battery {
    failures: Vec<String>,
}

impl Battery {
    fn fail(&mut self, example: &Example, message: impl AsRef<str>) {
        let (file, line) = example.provenance();
        self.failures.push(format!("{file}:{line}: {}", message.as_ref()));
    }

    fn finish(self, identifier: &str) {
        if self.failures.is_empty() {
            return;
        }
        let count = self.failures.len();
        let report = self.failures.join("\n\n");
        panic!("rule `{identifier}` failed verification ({count} failure(s)):\n{report}");
    }
}

/// The example tables actually run, honoring focus mode: when any example is
/// focused, only focused examples (and correction pairs with a focused side)
/// run.
struct Tables {
    non_triggering: Vec<Example>,
    triggering: Vec<Example>,
    corrections: Vec<(Example, Example)>,
}

impl Tables {
    fn focused(description: &RuleDescription, forbid_focused: bool, battery: &mut Battery) -> Self {
        let non_triggering: Vec<Example> = description
            .non_triggering_examples
            .iter()
            .filter(|example| example.is_focused())
            .cloned()
            .collect();
        let triggering: Vec<Example> = description
            .triggering_examples
            .iter()
            .filter(|example| example.is_focused())
            .cloned()
            .collect();
        let corrections: Vec<(Example, Example)> = description
            .corrections
            .iter()
            .filter(|(before, after)| before.is_focused() || after.is_focused())
            .cloned()
            .collect();

        if non_triggering.is_empty() && triggering.is_empty() && corrections.is_empty() {
            return Self {
                non_triggering: description.non_triggering_examples.clone(),
                triggering: description.triggering_examples.clone(),
                corrections: description.corrections.clone(),
            };
        }

        if forbid_focused {
            for example in non_triggering
                .iter()
                .chain(&triggering)
                .chain(corrections.iter().map(|(before, _)| before))
            {
                battery.fail(example, "focused examples are forbidden in this run");
            }
        }
        Self {
            non_triggering,
            triggering,
            corrections,
        }
    }
}

fn prefix(example: &Example, prefix: &str) -> Example {
    example.with_code(format!("{prefix}{}", example.code()))
}

fn prefixed(examples: &[Example], text: &str) -> Vec<Example> {
    examples
        .iter()
        .filter(|example| example.test_multi_byte_offsets())
        .map(|example| prefix(example, text))
        .collect()
}

/// Clones the rule and applies the example's configuration, falling back to
/// the battery-wide one.
fn configured<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    example: &Example,
    battery: &mut Battery,
) -> R {
    let mut rule = rule.clone();
    if let Some(value) = example.configuration().or(config.configuration.as_ref()) {
        if let Err(error) = rule.configure(value) {
            battery.fail(example, format!("failed to configure rule: {error}"));
        }
    }
    rule
}

/// Lints one example with markers stripped, through the driver so disable
/// directives and superfluous-disable findings behave as in production.
fn lint_example<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    example: &Example,
    on_disk: bool,
    battery: &mut Battery,
) -> Vec<Violation> {
    let rule = configured(rule, config, example, battery);
    let (clean, _) = example.strip_markers();
    match Fixture::new(&clean, on_disk) {
        Ok(fixture) => {
            let rules: Vec<&dyn Rule> = vec![&rule];
            Linter::new(rules).lint(fixture.buffer())
        }
        Err(error) => {
            battery.fail(example, format!("could not create fixture: {error}"));
            Vec::new()
        }
    }
}

fn verify_examples<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    triggers: &[Example],
    non_triggers: &[Example],
    on_disk: bool,
    battery: &mut Battery,
) {
    for non_trigger in non_triggers {
        let violations = lint_example(rule, config, non_trigger, on_disk, battery);
        if !violations.is_empty() {
            let rendered = render_violations(&violations, non_trigger.code());
            battery.fail(non_trigger, format!("non-triggering example violated:\n{rendered}"));
        }
    }

    for trigger in triggers {
        let violations = lint_example(rule, config, trigger, on_disk, battery);
        let (clean, marker_offsets) = trigger.strip_markers();

        if marker_offsets.is_empty() {
            if violations.is_empty() {
                battery.fail(
                    trigger,
                    format!("triggering example did not violate:\n```\n{clean}\n```"),
                );
            }
            continue;
        }

        // Expected locations are file-agnostic; location equality ignores
        // the file when either side has none.
        let probe = Buffer::new(clean.as_str());
        let expected: Vec<Location> = marker_offsets
            .iter()
            .map(|&offset| probe.location_at(offset))
            .collect();

        let unexpected: Vec<Violation> = violations
            .iter()
            .filter(|violation| !expected.contains(&violation.location))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            let rendered = render_violations(&unexpected, &clean);
            battery.fail(trigger, format!("violated at unexpected location:\n{rendered}"));
        }

        let reported: Vec<Location> = violations
            .iter()
            .map(|violation| violation.location.clone())
            .collect();
        let missing: Vec<Location> = expected
            .iter()
            .filter(|location| !reported.contains(location))
            .cloned()
            .collect();
        if !missing.is_empty() {
            let rendered = render_locations(&missing, &clean);
            battery.fail(trigger, format!("did not violate at expected location:\n{rendered}"));
        }

        if violations.len() != expected.len() {
            battery.fail(
                trigger,
                format!(
                    "expected {} violation(s), got {}",
                    expected.len(),
                    violations.len()
                ),
            );
            continue;
        }
        for (violation, location) in violations.iter().zip(&expected) {
            if violation.location != *location {
                battery.fail(
                    trigger,
                    format!(
                        "violation at {} did not match expected location {location}",
                        violation.location
                    ),
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn verify_wrapped<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    triggers: &[Example],
    on_disk: bool,
    battery: &mut Battery,
    enabled: fn(&Example) -> bool,
    wrap: impl Fn(&str) -> String,
    doesnt_violate: bool,
    context: &str,
) {
    let checked: Vec<&Example> = triggers.iter().filter(|example| enabled(example)).collect();
    if checked.is_empty() {
        return;
    }
    let total: usize = checked
        .iter()
        .map(|example| {
            let wrapped = example.with_code(wrap(example.code()));
            lint_example(rule, config, &wrapped, on_disk, battery).len()
        })
        .sum();
    let expected = if doesnt_violate { 0 } else { checked.len() };
    if total != expected {
        battery.fail(
            checked[0],
            format!(
                "expected {expected} violation(s) with triggering code wrapped in a {context}, got {total}"
            ),
        );
    }
}

fn verify_disable_command<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    tables: &Tables,
    command: &str,
    on_disk: bool,
    battery: &mut Battery,
) {
    for trigger in &tables.triggering {
        if !trigger.test_disable_command() {
            continue;
        }
        let disabled = trigger.with_code(format!("{command}{}", trigger.code()));
        let violations = lint_example(rule, config, &disabled, on_disk, battery);
        let (suppressed, superfluous): (Vec<&Violation>, Vec<&Violation>) = violations
            .iter()
            .partition(|violation| violation.identifier != SUPERFLUOUS_DISABLE_IDENTIFIER);
        if !suppressed.is_empty() {
            battery.fail(trigger, "violation(s) still triggered although rule was disabled");
        }
        if !superfluous.is_empty() {
            battery.fail(
                trigger,
                "disable command reported superfluous although it suppressed violation(s)",
            );
        }
    }

    // On a non-triggering example the same command suppresses nothing, so
    // the only finding must be the superfluous-disable one.
    for non_trigger in &tables.non_triggering {
        if !non_trigger.test_disable_command() {
            continue;
        }
        let disabled = non_trigger.with_code(format!("{command}{}", non_trigger.code()));
        let violations = lint_example(rule, config, &disabled, on_disk, battery);
        let superfluous_only = violations.len() == 1
            && violations[0].identifier == SUPERFLUOUS_DISABLE_IDENTIFIER;
        if !superfluous_only {
            let rendered = render_violations(&violations, disabled.code());
            battery.fail(
                non_trigger,
                format!("expected exactly one superfluous-disable finding:\n{rendered}"),
            );
        }
    }
}

fn verify_severity_override<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    triggers: &[Example],
    on_disk: bool,
    battery: &mut Battery,
) {
    let severity_configurable = rule
        .clone()
        .configure(&severity_value(Severity::Warning))
        .is_ok();
    if !severity_configurable {
        return;
    }
    let Some(example) = triggers.iter().find(|e| e.configuration().is_none()) else {
        return;
    };
    for severity in [Severity::Warning, Severity::Error] {
        let overridden = example.clone().with_config(severity_value(severity));
        let violations = lint_example(rule, config, &overridden, on_disk, battery);
        if !violations
            .iter()
            .all(|violation| violation.severity == severity)
        {
            battery.fail(
                example,
                format!("violation severity cannot be changed to {severity}"),
            );
        }
    }
}

/// Applies `correct` to `before` and checks convergence on `after`: content
/// equality (in memory and, for on-disk rules, after persisting), a
/// plausible edit count, and idempotence of a second pass.
fn verify_correction<R: Rule + Clone>(
    rule: &R,
    config: &VerifyConfig,
    before: &Example,
    after: &Example,
    on_disk: bool,
    battery: &mut Battery,
) {
    if cfg!(target_os = "linux") && !before.test_on_linux() {
        return;
    }
    let rule = configured(rule, config, before, battery);
    let (clean, _) = before.strip_markers();
    let mut fixture = match Fixture::new(&clean, on_disk) {
        Ok(fixture) => fixture,
        Err(error) => {
            battery.fail(before, format!("could not create fixture: {error}"));
            return;
        }
    };
    let rules: Vec<&dyn Rule> = vec![&rule];
    let linter = Linter::new(rules);

    let edits = linter.correct(fixture.buffer_mut());
    if clean == after.code() {
        if edits != 0 {
            battery.fail(before, format!("applied {edits} edit(s) to unviolating code"));
        }
    } else if edits == 0 {
        battery.fail(before, "correction applied no edits");
    }
    if fixture.buffer().contents() != after.code() {
        battery.fail(
            before,
            format!(
                "corrected contents did not match:\n```\n{}\n```\nexpected:\n```\n{}\n```",
                fixture.buffer().contents(),
                after.code()
            ),
        );
    }

    if on_disk {
        if let Err(error) = fixture.buffer().persist() {
            battery.fail(before, format!("could not persist correction: {error}"));
        } else {
            match fixture.reread() {
                Ok(Some(persisted)) if persisted != after.code() => {
                    battery.fail(before, "persisted contents did not match the expected code");
                }
                Ok(_) => {}
                Err(error) => {
                    battery.fail(before, format!("could not re-read fixture: {error}"));
                }
            }
        }
    }

    // Idempotence: correcting the corrected buffer is a no-op.
    let again = linter.correct(fixture.buffer_mut());
    if again != 0 || fixture.buffer().contents() != after.code() {
        battery.fail(before, format!("correction is not idempotent ({again} further edit(s))"));
    }
}
