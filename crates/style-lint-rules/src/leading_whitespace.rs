//! Rule forbidding whitespace at the start of a file.

use style_lint_core::{
    apply_edits, Buffer, ConfigError, Edit, Example, Location, Rule, RuleDescription, RuleKind,
    Severity, SeverityConfig, Violation,
};

/// Rule identifier for leading-whitespace.
pub const IDENTIFIER: &str = "leading-whitespace";

/// Rule name for leading-whitespace.
pub const NAME: &str = "Leading Whitespace";

const DESCRIPTION: &str = "Files should not contain leading whitespace";

/// Forbids whitespace and newlines at the very start of a file.
#[derive(Debug, Clone, Default)]
pub struct LeadingWhitespace {
    config: SeverityConfig,
}

impl LeadingWhitespace {
    /// Creates the rule with its default (warning) severity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.config = SeverityConfig::new(severity);
        self
    }

    /// Byte length of the run of leading whitespace.
    fn leading_whitespace_len(buffer: &Buffer) -> usize {
        buffer
            .contents()
            .find(|c: char| !c.is_whitespace())
            .unwrap_or_else(|| buffer.contents().len())
    }
}

impl Rule for LeadingWhitespace {
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
        RuleDescription::new(IDENTIFIER, NAME, DESCRIPTION, RuleKind::Style)
            .with_non_triggering(vec![Example::new("//")])
            .with_triggering(vec![
                // A leading comment prefix removes the condition, so the
                // prefixing variants cannot apply to these examples.
                Example::new("\n//")
                    .skip_multi_byte_offsets()
                    .skip_disable_command(),
                Example::new(" //")
                    .skip_multi_byte_offsets()
                    .skip_disable_command(),
            ])
            .with_corrections(vec![(
                Example::new("\n //").skip_multi_byte_offsets(),
                Example::new("//"),
            )])
    }

    fn detect(&self, buffer: &Buffer) -> Vec<Violation> {
        if Self::leading_whitespace_len(buffer) == 0 {
            return Vec::new();
        }
        vec![Violation::new(
            IDENTIFIER,
            NAME,
            self.severity(),
            Location::new(Some(1), None)
                .with_file(buffer.path().map(std::path::Path::to_path_buf)),
            DESCRIPTION,
        )]
    }

    fn correct(&self, buffer: &mut Buffer) -> usize {
        let len = Self::leading_whitespace_len(buffer);
        if len == 0 {
            return 0;
        }
        if buffer.rule_enabled(vec![0..len], &[IDENTIFIER]).is_empty() {
            return 0;
        }
        apply_edits(buffer, vec![Edit::new(0..len, "")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_file_has_no_violation() {
        let rule = LeadingWhitespace::new();
        assert!(rule.detect(&Buffer::new("//")).is_empty());
        assert!(rule.detect(&Buffer::new("")).is_empty());
    }

    #[test]
    fn leading_newline_violates_at_line_one() {
        let rule = LeadingWhitespace::new();
        let violations = rule.detect(&Buffer::new("\n //"));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Location::new(Some(1), None));
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn correction_strips_the_leading_run() {
        let rule = LeadingWhitespace::new();
        let mut buffer = Buffer::new("\n //");
        assert_eq!(rule.correct(&mut buffer), 1);
        assert_eq!(buffer.contents(), "//");
        // Idempotent on the corrected buffer.
        assert_eq!(rule.correct(&mut buffer), 0);
        assert_eq!(buffer.contents(), "//");
    }

    #[test]
    fn correction_respects_disable_directive() {
        let rule = LeadingWhitespace::new();
        // The leading run starts on the directive's own line, inside the
        // disabled region.
        let contents = " // style-lint:disable leading-whitespace\nx\n";
        let mut buffer = Buffer::new(contents);
        assert_eq!(rule.correct(&mut buffer), 0);
        assert_eq!(buffer.contents(), contents);
    }

    #[test]
    fn severity_is_configurable() {
        let mut rule = LeadingWhitespace::new();
        rule.configure(&style_lint_core::severity_value(Severity::Error))
            .unwrap_or_else(|e| panic!("configure: {e}"));
        let violations = rule.detect(&Buffer::new(" //"));
        assert_eq!(violations[0].severity, Severity::Error);
    }
}
