//! The correction engine: offset-stable multi-edit application and the
//! pattern pipeline shared by textual rules.

use crate::buffer::Buffer;
use crate::classifier::SyntaxKind;

use regex::Regex;
use std::ops::Range;
use tracing::{debug, trace};

/// A staged text replacement over a byte range of the buffer.
///
/// Edits within one application pass never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range to replace.
    pub range: Range<usize>,
    /// Replacement text.
    pub replacement: String,
}

impl Edit {
    /// Creates an edit.
    #[must_use]
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Applies staged edits to the buffer, returning the number applied.
///
/// Edits are applied in descending start order so an edit's length delta
/// never shifts the start offset of an edit not yet applied. An edit
/// overlapping one already applied is dropped; overlap resolution belongs
/// to the candidate stage, this is a last-line guard.
pub fn apply_edits(buffer: &mut Buffer, mut edits: Vec<Edit>) -> usize {
    if edits.is_empty() {
        return 0;
    }
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    let mut contents = buffer.contents().to_string();
    let mut applied = 0usize;
    let mut lowest_applied_start = usize::MAX;
    for edit in edits {
        if edit.range.end > lowest_applied_start {
            debug!(?edit.range, "dropping overlapping edit");
            continue;
        }
        contents.replace_range(edit.range.clone(), &edit.replacement);
        lowest_applied_start = edit.range.start;
        applied += 1;
    }
    buffer.set_contents(contents);
    applied
}

/// The generic pattern-to-correction pipeline.
///
/// Candidate ranges come from running `pattern` over the buffer, excluding
/// ranges the classifier labels as comment or string. A candidate whose
/// `blank_capture` group is entirely whitespace is a false positive of the
/// textual pattern (the "non-blank" line it matched is effectively blank)
/// and is discarded from both detection and correction.
#[derive(Debug)]
pub struct PatternCorrection<'a> {
    pattern: &'a Regex,
    template: &'a str,
    blank_capture: Option<usize>,
    excluded: &'a [SyntaxKind],
}

impl<'a> PatternCorrection<'a> {
    /// Default syntax kinds a textual pattern must never fire on.
    pub const NON_CODE: &'static [SyntaxKind] = &[SyntaxKind::Comment, SyntaxKind::String];

    /// Creates a pipeline replacing each match with the expansion of
    /// `template` (regex capture-group syntax, e.g. `"$1\n$2"`).
    #[must_use]
    pub fn new(pattern: &'a Regex, template: &'a str) -> Self {
        Self {
            pattern,
            template,
            blank_capture: None,
            excluded: Self::NON_CODE,
        }
    }

    /// Discards candidates whose capture group `group` is blank once
    /// trimmed of whitespace.
    #[must_use]
    pub fn blank_capture(mut self, group: usize) -> Self {
        self.blank_capture = Some(group);
        self
    }

    /// Overrides the excluded syntax kinds.
    #[must_use]
    pub fn excluding(mut self, excluded: &'a [SyntaxKind]) -> Self {
        self.excluded = excluded;
        self
    }

    /// Candidate ranges after syntactic exclusion, overlap resolution
    /// (keep-first-by-position), and false-positive filtering.
    #[must_use]
    pub fn violation_ranges(&self, buffer: &Buffer) -> Vec<Range<usize>> {
        let mut kept = Vec::new();
        let mut previous_end = 0usize;
        for range in buffer.match_pattern(self.pattern, self.excluded) {
            if !kept.is_empty() && range.start < previous_end {
                trace!(?range, "dropping overlapping candidate");
                continue;
            }
            if self.is_false_positive(buffer, &range) {
                trace!(?range, "suppressing false positive");
                continue;
            }
            previous_end = range.end;
            kept.push(range);
        }
        kept
    }

    /// Absolute byte range of capture `group` within the candidate `range`,
    /// used to place violations on a sub-range of the match.
    #[must_use]
    pub fn capture_range(
        &self,
        buffer: &Buffer,
        range: &Range<usize>,
        group: usize,
    ) -> Option<Range<usize>> {
        let candidate = &buffer.contents()[range.clone()];
        let capture = self.pattern.captures(candidate)?.get(group)?;
        Some(range.start + capture.start()..range.start + capture.end())
    }

    /// Applies the template to every enabled candidate, highest offset
    /// first, and returns the edit count. Disable directives naming any of
    /// the rule's `identifiers` (canonical identifier plus aliases) block
    /// the candidates they cover.
    pub fn correct(&self, buffer: &mut Buffer, identifiers: &[&str]) -> usize {
        let ranges = buffer.rule_enabled(self.violation_ranges(buffer), identifiers);
        if ranges.is_empty() {
            return 0;
        }
        let mut edits = Vec::with_capacity(ranges.len());
        for range in ranges {
            let candidate = &buffer.contents()[range.clone()];
            let Some(captures) = self.pattern.captures(candidate) else {
                continue;
            };
            let mut replacement = String::new();
            captures.expand(self.template, &mut replacement);
            edits.push(Edit::new(range, replacement));
        }
        debug!(
            rule = identifiers.first().copied().unwrap_or_default(),
            edits = edits.len(),
            "applying corrections"
        );
        apply_edits(buffer, edits)
    }

    fn is_false_positive(&self, buffer: &Buffer, range: &Range<usize>) -> bool {
        let Some(group) = self.blank_capture else {
            return false;
        };
        let candidate = &buffer.contents()[range.clone()];
        let Some(captures) = self.pattern.captures(candidate) else {
            return false;
        };
        captures
            .get(group)
            .is_some_and(|m| m.as_str().trim().is_empty())
    }
}
