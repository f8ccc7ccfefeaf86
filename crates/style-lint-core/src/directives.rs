//! Comment-based disable directives.
//!
//! Supports single-line directives like:
//! ```text
//! // style-lint:disable leading-whitespace vertical-whitespace-between-cases
//! // style-lint:enable leading-whitespace
//! ```
//!
//! A disable's effect spans from its own line to the next enable directive
//! naming the same identifier (or `all`), or to the end of the file.

use std::ops::Range;

/// Directive prefix that disables rules from its line forward.
pub const DISABLE_PREFIX: &str = "style-lint:disable";

/// Directive prefix that re-enables previously disabled rules.
pub const ENABLE_PREFIX: &str = "style-lint:enable";

/// Umbrella identifier matching every rule.
pub const ALL_IDENTIFIER: &str = "all";

/// Reserved identifier for the "this disable directive matched nothing"
/// meta finding.
pub const SUPERFLUOUS_DISABLE_IDENTIFIER: &str = "superfluous-disable-command";

/// A parsed disable directive.
#[derive(Debug, Clone)]
pub struct DisableDirective {
    /// Rule identifiers the directive names.
    pub identifiers: Vec<String>,
    /// Line the directive appears on (1-indexed).
    pub line: usize,
    /// Character the directive starts at (1-indexed).
    pub character: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    Disable,
    Enable,
}

/// One identifier's disabled line span, tied back to its directive.
#[derive(Debug, Clone)]
struct Region {
    directive: usize,
    identifier: String,
    /// Half-open 1-indexed line range; `usize::MAX` end means end of file.
    lines: Range<usize>,
}

/// All disabled regions of a buffer, scanned from its directives.
#[derive(Debug, Clone, Default)]
pub struct DisabledRegions {
    directives: Vec<DisableDirective>,
    regions: Vec<Region>,
}

impl DisabledRegions {
    /// Scans `contents` for disable/enable directives.
    #[must_use]
    pub fn scan(contents: &str) -> Self {
        let mut directives = Vec::new();
        let mut regions: Vec<Region> = Vec::new();
        // Identifier -> index into `regions` of the currently open span.
        let mut open: Vec<(String, usize)> = Vec::new();

        for (idx, text) in contents.lines().enumerate() {
            let line = idx + 1;
            let Some((kind, identifiers)) = parse_directive(text) else {
                continue;
            };
            match kind {
                DirectiveKind::Disable => {
                    let character = text.chars().take_while(|c| c.is_whitespace()).count() + 1;
                    let directive = directives.len();
                    for identifier in &identifiers {
                        // A second disable while the identifier is already
                        // open contributes no region of its own.
                        if open.iter().any(|(id, _)| id == identifier) {
                            continue;
                        }
                        open.push((identifier.clone(), regions.len()));
                        regions.push(Region {
                            directive,
                            identifier: identifier.clone(),
                            lines: line..usize::MAX,
                        });
                    }
                    directives.push(DisableDirective {
                        identifiers,
                        line,
                        character,
                    });
                }
                DirectiveKind::Enable => {
                    open.retain(|(id, region)| {
                        let closes = identifiers.iter().any(|enable| {
                            enable == ALL_IDENTIFIER || enable == id
                        });
                        if closes {
                            regions[*region].lines.end = line;
                        }
                        !closes
                    });
                }
            }
        }

        Self {
            directives,
            regions,
        }
    }

    /// True when the buffer contains no disable directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// The disable directives in source order.
    #[must_use]
    pub fn directives(&self) -> &[DisableDirective] {
        &self.directives
    }

    /// Whether `identifier` is disabled at the 1-indexed `line`.
    #[must_use]
    pub fn is_disabled(&self, identifier: &str, line: usize) -> bool {
        self.suppressor(identifier, line).is_some()
    }

    /// Index of the directive suppressing any of `identifiers` at `line`.
    ///
    /// A rule is addressable by every name in its
    /// [`RuleDescription::all_identifiers`](crate::RuleDescription::all_identifiers),
    /// so callers pass the full list, canonical identifier first.
    #[must_use]
    pub fn suppressor_of(&self, identifiers: &[&str], line: usize) -> Option<usize> {
        identifiers
            .iter()
            .find_map(|identifier| self.suppressor(identifier, line))
    }

    /// Index of the directive suppressing `identifier` at `line`, if any.
    #[must_use]
    pub fn suppressor(&self, identifier: &str, line: usize) -> Option<usize> {
        self.regions
            .iter()
            .find(|region| {
                (region.identifier == identifier || region.identifier == ALL_IDENTIFIER)
                    && region.lines.contains(&line)
            })
            .map(|region| region.directive)
    }
}

fn parse_directive(text: &str) -> Option<(DirectiveKind, Vec<String>)> {
    let comment = text.trim().strip_prefix("//")?.trim_start();
    let (kind, rest) = if let Some(rest) = comment.strip_prefix(DISABLE_PREFIX) {
        (DirectiveKind::Disable, rest)
    } else if let Some(rest) = comment.strip_prefix(ENABLE_PREFIX) {
        (DirectiveKind::Enable, rest)
    } else {
        return None;
    };
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let identifiers: Vec<String> = rest
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if identifiers.is_empty() {
        return None;
    }
    Some((kind, identifiers))
}
