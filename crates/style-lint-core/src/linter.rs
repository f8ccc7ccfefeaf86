//! Drives rules over a buffer, honoring disable directives.

use crate::buffer::Buffer;
use crate::directives::{DisabledRegions, SUPERFLUOUS_DISABLE_IDENTIFIER};
use crate::rule::Rule;
use crate::types::{Location, Severity, Violation};

use tracing::debug;

/// Human-readable name of the superfluous-disable meta finding.
const SUPERFLUOUS_DISABLE_NAME: &str = "Superfluous Disable Command";

/// Runs a set of rules against single buffers.
///
/// Detection filters each rule's violations through the buffer's disabled
/// regions, then flags every disable directive that suppressed nothing with
/// the reserved [`SUPERFLUOUS_DISABLE_IDENTIFIER`] meta finding. Correction
/// delegates to each rule's `correct`, which honors disabled regions
/// through [`Buffer::rule_enabled`].
pub struct Linter<'a> {
    rules: Vec<&'a dyn Rule>,
}

impl<'a> Linter<'a> {
    /// Creates a linter over the given rules.
    #[must_use]
    pub fn new(rules: Vec<&'a dyn Rule>) -> Self {
        Self { rules }
    }

    /// Detects violations, with disabled regions applied.
    #[must_use]
    pub fn lint(&self, buffer: &Buffer) -> Vec<Violation> {
        let regions = DisabledRegions::scan(buffer.contents());
        let mut suppressed = vec![false; regions.directives().len()];
        let mut kept = Vec::new();

        for rule in &self.rules {
            let detected = rule.detect(buffer);
            debug!(rule = rule.identifier(), count = detected.len(), "detected");
            // A directive can name the rule by any declared identifier.
            let identifiers = rule.description().all_identifiers();
            for violation in detected {
                let line = violation.location.line.unwrap_or(1);
                match regions.suppressor_of(&identifiers, line) {
                    Some(directive) => suppressed[directive] = true,
                    None => kept.push(violation),
                }
            }
        }

        for (index, directive) in regions.directives().iter().enumerate() {
            if suppressed[index] {
                continue;
            }
            if regions.is_disabled(SUPERFLUOUS_DISABLE_IDENTIFIER, directive.line) {
                continue;
            }
            kept.push(Violation::new(
                SUPERFLUOUS_DISABLE_IDENTIFIER,
                SUPERFLUOUS_DISABLE_NAME,
                Severity::Warning,
                Location::new(Some(directive.line), Some(directive.character))
                    .with_file(buffer.path().map(std::path::Path::to_path_buf)),
                format!(
                    "disable command for '{}' did not suppress any violation",
                    directive.identifiers.join(", ")
                ),
            ));
        }

        kept.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });
        kept
    }

    /// Applies every rule's corrections, returning the total edit count.
    pub fn correct(&self, buffer: &mut Buffer) -> usize {
        self.rules
            .iter()
            .map(|rule| {
                let applied = rule.correct(buffer);
                if applied > 0 {
                    debug!(rule = rule.identifier(), applied, "corrected");
                }
                applied
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correction::{apply_edits, Edit};
    use crate::rule::RuleDescription;
    use crate::types::RuleKind;

    /// Flags every `\t` outside comments and strings.
    #[derive(Debug, Clone)]
    struct NoTabs {
        pattern: regex::Regex,
    }

    impl NoTabs {
        fn new() -> Self {
            #[allow(clippy::unwrap_used)]
            let pattern = regex::Regex::new("\t").unwrap();
            Self { pattern }
        }
    }

    impl Rule for NoTabs {
        fn identifier(&self) -> &'static str {
            "no-tabs"
        }

        fn description(&self) -> RuleDescription {
            RuleDescription::new("no-tabs", "No Tabs", "Tabs are banned", RuleKind::Style)
                .with_aliases(vec!["legacy-no-tabs"])
        }

        fn detect(&self, buffer: &Buffer) -> Vec<Violation> {
            buffer
                .match_pattern(&self.pattern, crate::correction::PatternCorrection::NON_CODE)
                .into_iter()
                .map(|range| {
                    self.description().violation(
                        Severity::Warning,
                        buffer.location_at(buffer.char_offset(range.start)),
                    )
                })
                .collect()
        }

        fn correct(&self, buffer: &mut Buffer) -> usize {
            let ranges = buffer.rule_enabled(
                buffer.match_pattern(&self.pattern, crate::correction::PatternCorrection::NON_CODE),
                &self.description().all_identifiers(),
            );
            let edits = ranges
                .into_iter()
                .map(|range| Edit::new(range, "    "))
                .collect();
            apply_edits(buffer, edits)
        }
    }

    #[test]
    fn lint_reports_enabled_violations_in_order() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let buffer = Buffer::new("a\tb\n\tc\n");
        let violations = linter.lint(&buffer);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location, Location::new(Some(1), Some(2)));
        assert_eq!(violations[1].location, Location::new(Some(2), Some(1)));
    }

    #[test]
    fn disable_directive_suppresses_and_is_not_superfluous() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let buffer = Buffer::new("// style-lint:disable no-tabs\na\tb\n");
        assert!(linter.lint(&buffer).is_empty());
    }

    #[test]
    fn alias_named_directive_suppresses_and_is_not_superfluous() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let buffer = Buffer::new("// style-lint:disable legacy-no-tabs\na\tb\n");
        assert!(linter.lint(&buffer).is_empty());
    }

    #[test]
    fn correct_honors_alias_named_directives() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let mut buffer = Buffer::new("// style-lint:disable legacy-no-tabs\n\tb\n");
        assert_eq!(linter.correct(&mut buffer), 0);
        assert_eq!(buffer.contents(), "// style-lint:disable legacy-no-tabs\n\tb\n");
    }

    #[test]
    fn unused_disable_directive_is_superfluous() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let buffer = Buffer::new("// style-lint:disable no-tabs\nclean\n");
        let violations = linter.lint(&buffer);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].identifier, SUPERFLUOUS_DISABLE_IDENTIFIER);
        assert_eq!(violations[0].location, Location::new(Some(1), Some(1)));
    }

    #[test]
    fn superfluous_finding_can_itself_be_disabled() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let buffer = Buffer::new(
            "// style-lint:disable superfluous-disable-command\n// style-lint:disable no-tabs\nclean\n",
        );
        // The no-tabs directive is unused, but flagging it is disabled; the
        // superfluous directive itself suppressed that finding.
        let violations = linter.lint(&buffer);
        assert!(
            violations.is_empty(),
            "unexpected violations: {violations:?}"
        );
    }

    #[test]
    fn re_enabled_region_reports_again() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let buffer = Buffer::new(
            "// style-lint:disable no-tabs\na\tb\n// style-lint:enable no-tabs\nc\td\n",
        );
        let violations = linter.lint(&buffer);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, Some(4));
    }

    #[test]
    fn correct_skips_disabled_regions() {
        let rule = NoTabs::new();
        let linter = Linter::new(vec![&rule]);
        let mut buffer = Buffer::new("\ta\n// style-lint:disable no-tabs\n\tb\n");
        assert_eq!(linter.correct(&mut buffer), 1);
        assert_eq!(buffer.contents(), "    a\n// style-lint:disable no-tabs\n\tb\n");
    }
}
