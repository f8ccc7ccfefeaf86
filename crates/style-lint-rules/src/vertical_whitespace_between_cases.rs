//! Rule requiring a blank line between switch cases.
//!
//! The condition is purely textual: a non-blank line directly followed by a
//! `case`/`default` line. The raw pattern over-matches lines that are blank
//! except for trailing whitespace, so candidates run through the correction
//! engine's blank-capture false-positive filter.

use regex::Regex;
use style_lint_core::{
    Buffer, ConfigError, Example, PatternCorrection, Rule, RuleDescription, RuleKind, Severity,
    SeverityConfig, Violation,
};

/// Rule identifier for vertical-whitespace-between-cases.
pub const IDENTIFIER: &str = "vertical-whitespace-between-cases";

/// Rule name for vertical-whitespace-between-cases.
pub const NAME: &str = "Vertical Whitespace Between Cases";

const DESCRIPTION: &str = "Include a single empty line between switch cases";

const PATTERN: &str = r"([^\n{][ \t]*\n)([ \t]*(?:case[^\n]+|default|@unknown default):[ \t]*\n)";

const TEMPLATE: &str = "$1\n$2";

/// Requires one empty line between the arms of a `switch`.
#[derive(Debug, Clone)]
pub struct VerticalWhitespaceBetweenCases {
    config: SeverityConfig,
    pattern: Regex,
}

impl Default for VerticalWhitespaceBetweenCases {
    fn default() -> Self {
        Self::new()
    }
}

impl VerticalWhitespaceBetweenCases {
    /// Creates the rule with its default (warning) severity.
    #[must_use]
    pub fn new() -> Self {
        // The pattern is a vetted constant.
        #[allow(clippy::unwrap_used)]
        let pattern = Regex::new(PATTERN).unwrap();
        Self {
            config: SeverityConfig::default(),
            pattern,
        }
    }

    fn pattern_correction(&self) -> PatternCorrection<'_> {
        PatternCorrection::new(&self.pattern, TEMPLATE).blank_capture(1)
    }

    /// The canonical violating-to-valid pairs; triggering examples,
    /// corrections, and part of the non-triggering examples derive from
    /// them.
    fn violating_to_valid() -> Vec<(Example, Example)> {
        vec![
            (
                Example::new(
                    "switch x {\n\
                     case 0..<5:\n    \
                         return \"x is valid\"\n\
                     ↓default:\n    \
                         return \"x is invalid\"\n\
                     ↓@unknown default:\n    \
                         print(\"x is out of this world\")\n\
                     }\n",
                ),
                Example::new(
                    "switch x {\n\
                     case 0..<5:\n    \
                         return \"x is valid\"\n\
                     \n\
                     default:\n    \
                         return \"x is invalid\"\n\
                     \n\
                     @unknown default:\n    \
                         print(\"x is out of this world\")\n\
                     }\n",
                ),
            ),
            (
                Example::new(
                    "switch x {\n\
                     case 0..<5:\n    \
                         print(\"x is valid\")\n\
                     ↓default:\n    \
                         print(\"x is invalid\")\n\
                     }\n",
                ),
                Example::new(
                    "switch x {\n\
                     case 0..<5:\n    \
                         print(\"x is valid\")\n\
                     \n\
                     default:\n    \
                         print(\"x is invalid\")\n\
                     }\n",
                ),
            ),
            (
                Example::new(
                    "switch x {\n\
                     case .valid:\n    \
                         print(\"x is valid\")\n\
                     ↓case .invalid:\n    \
                         print(\"x is invalid\")\n\
                     }\n",
                ),
                Example::new(
                    "switch x {\n\
                     case .valid:\n    \
                         print(\"x is valid\")\n\
                     \n\
                     case .invalid:\n    \
                         print(\"x is invalid\")\n\
                     }\n",
                ),
            ),
            (
                Example::new(
                    "switch x {\n\
                     case .valid:\n    \
                         print(\"multiple ...\")\n    \
                         print(\"... lines\")\n\
                     ↓case .invalid:\n    \
                         print(\"multiple ...\")\n    \
                         print(\"... lines\")\n\
                     }\n",
                ),
                Example::new(
                    "switch x {\n\
                     case .valid:\n    \
                         print(\"multiple ...\")\n    \
                         print(\"... lines\")\n\
                     \n\
                     case .invalid:\n    \
                         print(\"multiple ...\")\n    \
                         print(\"... lines\")\n\
                     }\n",
                ),
            ),
        ]
    }

    fn non_triggering_examples() -> Vec<Example> {
        vec![
            Example::new(
                "switch x {\n\
                 \n\
                 case 0..<5:\n    \
                     print(\"x is low\")\n\
                 \n\
                 case 5..<10:\n    \
                     print(\"x is high\")\n\
                 \n\
                 default:\n    \
                     print(\"x is invalid\")\n\
                 \n\
                 @unknown default:\n    \
                     print(\"x is out of this world\")\n\
                 }\n",
            ),
            Example::new(
                "switch x {\n\
                 case 0..<5:\n    \
                     print(\"x is low\")\n\
                 \n\
                 case 5..<10:\n    \
                     print(\"x is high\")\n\
                 \n\
                 default:\n    \
                     print(\"x is invalid\")\n\
                 }\n",
            ),
            Example::new(
                "switch x {\n\
                 case 0..<5: print(\"x is low\")\n\
                 case 5..<10: print(\"x is high\")\n\
                 default: print(\"x is invalid\")\n\
                 @unknown default: print(\"x is out of this world\")\n\
                 }\n",
            ),
            // A blank line that carries trailing spaces must not count as
            // missing vertical whitespace.
            Example::new(
                "switch x {    \n\
                 case 1:    \n    \
                     print(\"one\")    \n    \
                 \n\
                 default:    \n    \
                     print(\"not one\")    \n\
                 }    ",
            ),
        ]
    }
}

impl Rule for VerticalWhitespaceBetweenCases {
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
        let pairs = Self::violating_to_valid();
        let triggering: Vec<Example> = pairs.iter().map(|(before, _)| before.clone()).collect();
        let mut non_triggering: Vec<Example> =
            pairs.iter().map(|(_, after)| after.clone()).collect();
        non_triggering.extend(Self::non_triggering_examples());
        let corrections = pairs
            .into_iter()
            .map(|(before, after)| {
                let (clean, _) = before.strip_markers();
                (before.with_code(clean), after)
            })
            .collect();
        RuleDescription::new(IDENTIFIER, NAME, DESCRIPTION, RuleKind::Style)
            .with_non_triggering(non_triggering)
            .with_triggering(triggering)
            .with_corrections(corrections)
    }

    fn detect(&self, buffer: &Buffer) -> Vec<Violation> {
        let correction = self.pattern_correction();
        correction
            .violation_ranges(buffer)
            .iter()
            .filter_map(|range| {
                // The violation sits on the case line, capture group 2.
                let capture = correction.capture_range(buffer, range, 2)?;
                Some(Violation::new(
                    IDENTIFIER,
                    NAME,
                    self.severity(),
                    buffer.location_at(buffer.char_offset(capture.start)),
                    DESCRIPTION,
                ))
            })
            .collect()
    }

    fn correct(&self, buffer: &mut Buffer) -> usize {
        self.pattern_correction().correct(buffer, &[IDENTIFIER])
    }
}
