//! The rule contract: detect, correct, and declarative self-description.

use crate::buffer::Buffer;
use crate::config::ConfigError;
use crate::example::Example;
use crate::types::{LanguageVersion, Location, RuleKind, Severity, Violation};

/// A lint rule.
///
/// Every rule exposes two operations over a [`Buffer`]: `detect`, which is
/// pure with respect to the buffer and returns violations in a deterministic
/// order, and `correct`, which mutates the buffer in place to remove the
/// violations it can safely fix and returns the number of edits applied.
/// `correct` must be idempotent and must leave a buffer with no applicable
/// violations untouched.
///
/// # Example
///
/// ```ignore
/// use style_lint_core::{Buffer, Rule, RuleDescription, RuleKind, Violation};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn identifier(&self) -> &'static str { "no-tabs" }
///
///     fn detect(&self, buffer: &Buffer) -> Vec<Violation> {
///         // ...
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable kebab-case identifier (e.g., `"leading-whitespace"`).
    fn identifier(&self) -> &'static str;

    /// Severity currently configured for this rule's violations.
    fn severity(&self) -> Severity {
        Severity::Warning
    }

    /// Reconfigures the rule from an opaque TOML value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigurable`] by default; rules with
    /// configuration override this and return [`ConfigError::Invalid`] for
    /// values they cannot construct their configuration from.
    fn configure(&mut self, _config: &toml::Value) -> Result<(), ConfigError> {
        Err(ConfigError::NotConfigurable {
            rule: self.identifier().to_string(),
        })
    }

    /// The rule's declarative self-description, including its example
    /// tables.
    fn description(&self) -> RuleDescription;

    /// Scans the buffer and reports violations. Must not mutate the buffer
    /// or shared state observable by concurrent calls on other buffers.
    fn detect(&self, buffer: &Buffer) -> Vec<Violation>;

    /// Rewrites the buffer to remove violations, returning the number of
    /// edits applied. The default is a no-op for rules without corrections.
    fn correct(&self, _buffer: &mut Buffer) -> usize {
        0
    }
}

/// Type alias for boxed rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A rule's full self-description: identity, category, and the example
/// tables the verification harness expands into its test matrix.
#[derive(Debug, Clone)]
pub struct RuleDescription {
    /// Stable kebab-case identifier.
    pub identifier: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line prose description, used as the violation reason.
    pub description: &'static str,
    /// Category tag.
    pub kind: RuleKind,
    /// Minimum language version the rule applies to.
    pub min_version: LanguageVersion,
    /// Deprecated or umbrella identifiers this rule also answers to.
    pub aliases: Vec<&'static str>,
    /// Examples that must never report a violation.
    pub non_triggering_examples: Vec<Example>,
    /// Examples that must report exactly the marked violations.
    pub triggering_examples: Vec<Example>,
    /// Before/after pairs: applying `correct` to the before-example must
    /// yield exactly the after-example's content.
    pub corrections: Vec<(Example, Example)>,
    /// Whether the rule needs a persisted file path rather than an
    /// in-memory buffer.
    pub requires_file_on_disk: bool,
}

impl RuleDescription {
    /// Creates a description with empty example tables.
    #[must_use]
    pub fn new(
        identifier: &'static str,
        name: &'static str,
        description: &'static str,
        kind: RuleKind,
    ) -> Self {
        Self {
            identifier,
            name,
            description,
            kind,
            min_version: LanguageVersion::FIRST,
            aliases: Vec::new(),
            non_triggering_examples: Vec::new(),
            triggering_examples: Vec::new(),
            corrections: Vec::new(),
            requires_file_on_disk: false,
        }
    }

    /// Sets the minimum language version.
    #[must_use]
    pub fn with_min_version(mut self, version: LanguageVersion) -> Self {
        self.min_version = version;
        self
    }

    /// Adds alias identifiers.
    #[must_use]
    pub fn with_aliases(mut self, aliases: Vec<&'static str>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Sets the non-triggering examples.
    #[must_use]
    pub fn with_non_triggering(mut self, examples: Vec<Example>) -> Self {
        self.non_triggering_examples = examples;
        self
    }

    /// Sets the triggering examples.
    #[must_use]
    pub fn with_triggering(mut self, examples: Vec<Example>) -> Self {
        self.triggering_examples = examples;
        self
    }

    /// Sets the correction pairs.
    #[must_use]
    pub fn with_corrections(mut self, corrections: Vec<(Example, Example)>) -> Self {
        self.corrections = corrections;
        self
    }

    /// Marks the rule as needing a persisted file.
    #[must_use]
    pub fn on_disk(mut self) -> Self {
        self.requires_file_on_disk = true;
        self
    }

    /// Every identifier a disable directive can name this rule by.
    #[must_use]
    pub fn all_identifiers(&self) -> Vec<&'static str> {
        let mut identifiers = vec![self.identifier];
        identifiers.extend(&self.aliases);
        identifiers
    }

    /// Builds a violation of this rule, with the description as reason.
    #[must_use]
    pub fn violation(&self, severity: Severity, location: Location) -> Violation {
        Violation::new(self.identifier, self.name, severity, location, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct TestRule;

    impl Rule for TestRule {
        fn identifier(&self) -> &'static str {
            "test-rule"
        }

        fn description(&self) -> RuleDescription {
            RuleDescription::new("test-rule", "Test Rule", "A test rule", RuleKind::Lint)
                .with_aliases(vec!["legacy-test-rule"])
        }

        fn detect(&self, _buffer: &Buffer) -> Vec<Violation> {
            Vec::new()
        }
    }

    #[test]
    fn default_correct_is_a_noop() {
        let rule = TestRule;
        let mut buffer = Buffer::new("x\n");
        assert_eq!(rule.correct(&mut buffer), 0);
        assert_eq!(buffer.contents(), "x\n");
    }

    #[test]
    fn default_configure_is_rejected() {
        let mut rule = TestRule;
        let value = toml::Value::Boolean(true);
        assert!(matches!(
            rule.configure(&value),
            Err(ConfigError::NotConfigurable { .. })
        ));
    }

    #[test]
    fn all_identifiers_includes_aliases() {
        let description = TestRule.description();
        assert_eq!(
            description.all_identifiers(),
            vec!["test-rule", "legacy-test-rule"]
        );
    }

    #[test]
    fn description_builds_violations() {
        let description = TestRule.description();
        let violation =
            description.violation(Severity::Error, Location::new(Some(2), Some(3)));
        assert_eq!(violation.identifier, "test-rule");
        assert_eq!(violation.reason, "A test rule");
        assert_eq!(violation.severity, Severity::Error);
    }
}
