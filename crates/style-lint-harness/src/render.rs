//! Renders violations and expected locations as annotated source blocks.
//!
//! Output is a fenced block reproducing the source, with a caret line under
//! each violation or an in-text marker at each expected-but-missing
//! location. Purely presentational; nothing downstream parses it.

use style_lint_core::{Location, Violation, VIOLATION_MARKER};

/// Renders `violations` interleaved into `contents` as caret annotations.
///
/// Each violation with a line and character inserts, directly below its
/// line, a line of the form `^ severity: Name Violation: reason
/// (identifier)` indented to the violating character. Violations without a
/// character are skipped.
#[must_use]
pub fn render_violations(violations: &[Violation], contents: &str) -> String {
    let mut lines: Vec<String> = contents.lines().map(str::to_owned).collect();
    let mut sorted: Vec<&Violation> = violations.iter().collect();
    sorted.sort_by(|a, b| b.location.cmp(&a.location));
    for violation in sorted {
        let (Some(line), Some(character)) = (violation.location.line, violation.location.character)
        else {
            continue;
        };
        let message = format!(
            "{}^ {}: {} Violation: {} ({})",
            " ".repeat(character - 1),
            violation.severity,
            violation.name,
            violation.reason,
            violation.identifier,
        );
        if line >= lines.len() {
            lines.push(message);
        } else {
            lines.insert(line, message);
        }
    }
    fenced(&lines)
}

/// Renders `locations` as in-text markers inserted into `contents`.
///
/// Used to show where a triggering example expected a violation that was
/// never reported. Locations without a line or character, or beyond the
/// source, are skipped.
#[must_use]
pub fn render_locations(locations: &[Location], contents: &str) -> String {
    let mut lines: Vec<String> = contents.lines().map(str::to_owned).collect();
    let mut sorted: Vec<&Location> = locations.iter().collect();
    sorted.sort_by(|a, b| b.cmp(a));
    for location in sorted {
        let (Some(line), Some(character)) = (location.line, location.character) else {
            continue;
        };
        let Some(target) = lines.get_mut(line - 1) else {
            continue;
        };
        let byte = target
            .char_indices()
            .nth(character - 1)
            .map_or(target.len(), |(byte, _)| byte);
        target.insert(byte, VIOLATION_MARKER);
    }
    fenced(&lines)
}

fn fenced(lines: &[String]) -> String {
    format!("```\n{}\n```", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_lint_core::Severity;

    fn violation(line: usize, character: usize) -> Violation {
        Violation::new(
            "demo-rule",
            "Demo",
            Severity::Warning,
            Location::new(Some(line), Some(character)),
            "demo reason",
        )
    }

    #[test]
    fn caret_lands_under_the_violating_character() {
        let rendered = render_violations(&[violation(2, 5)], "let a = 1\nlet bad = 2\n");
        assert_eq!(
            rendered,
            "```\nlet a = 1\nlet bad = 2\n    ^ warning: Demo Violation: demo reason (demo-rule)\n```"
        );
    }

    #[test]
    fn annotation_past_the_last_line_is_appended() {
        let rendered = render_violations(&[violation(9, 1)], "one line");
        assert_eq!(
            rendered,
            "```\none line\n^ warning: Demo Violation: demo reason (demo-rule)\n```"
        );
    }

    #[test]
    fn later_violations_render_first_so_line_indices_stay_valid() {
        let rendered = render_violations(&[violation(1, 1), violation(2, 1)], "a\nb\n");
        assert_eq!(
            rendered,
            "```\na\n^ warning: Demo Violation: demo reason (demo-rule)\nb\n^ warning: Demo Violation: demo reason (demo-rule)\n```"
        );
    }

    #[test]
    fn characterless_violations_are_skipped() {
        let mut partial = violation(1, 1);
        partial.location = Location::new(Some(1), None);
        assert_eq!(render_violations(&[partial], "a\n"), "```\na\n```");
    }

    #[test]
    fn missing_locations_are_marked_in_text() {
        let rendered = render_locations(
            &[Location::new(Some(2), Some(1)), Location::new(Some(2), Some(3))],
            "switch x {\ncase 1:\n}\n",
        );
        assert_eq!(rendered, "```\nswitch x {\n↓ca↓se 1:\n}\n```");
    }
}
