//! Labeled source snippets used both as specification and as test fixture.

/// Sentinel marking an expected violation's character offset inside an
/// [`Example`]'s code. Never part of the logical source; stripped before
/// execution.
pub const VIOLATION_MARKER: char = '↓';

/// Removes every violation marker from `code`.
///
/// Each returned offset is the marker's character offset relative to the
/// already-stripped text, so later markers account for the ones removed
/// before them.
#[must_use]
pub fn strip_markers(code: &str) -> (String, Vec<usize>) {
    let mut clean = String::with_capacity(code.len());
    let mut offsets = Vec::new();
    let mut chars = 0usize;
    for c in code.chars() {
        if c == VIOLATION_MARKER {
            offsets.push(chars);
        } else {
            clean.push(c);
            chars += 1;
        }
    }
    (clean, offsets)
}

/// A source snippet declared by a rule, optionally carrying violation
/// markers and per-example configuration.
///
/// Flags control which synthesized harness variants apply; all default to
/// on. Provenance (declaration file and line) is captured at the call site
/// of [`Example::new`] and used only for failure reporting.
#[derive(Debug, Clone)]
pub struct Example {
    code: String,
    configuration: Option<toml::Value>,
    test_multi_byte_offsets: bool,
    test_wrapping_in_comment: bool,
    test_wrapping_in_string: bool,
    test_disable_command: bool,
    test_on_linux: bool,
    focused: bool,
    file: &'static str,
    line: u32,
}

impl Example {
    /// Declares an example, recording the caller as its provenance.
    #[must_use]
    #[track_caller]
    pub fn new(code: impl Into<String>) -> Self {
        let caller = std::panic::Location::caller();
        Self {
            code: code.into(),
            configuration: None,
            test_multi_byte_offsets: true,
            test_wrapping_in_comment: true,
            test_wrapping_in_string: true,
            test_disable_command: true,
            test_on_linux: true,
            focused: false,
            file: caller.file(),
            line: caller.line(),
        }
    }

    /// The example's code, markers included.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Rule-specific configuration to apply just for this example.
    #[must_use]
    pub fn configuration(&self) -> Option<&toml::Value> {
        self.configuration.as_ref()
    }

    /// Declaration site as `(file, line)`.
    #[must_use]
    pub fn provenance(&self) -> (&'static str, u32) {
        (self.file, self.line)
    }

    /// Whether the multi-byte offset and shebang variants apply.
    #[must_use]
    pub fn test_multi_byte_offsets(&self) -> bool {
        self.test_multi_byte_offsets
    }

    /// Whether the comment-wrapped variant applies.
    #[must_use]
    pub fn test_wrapping_in_comment(&self) -> bool {
        self.test_wrapping_in_comment
    }

    /// Whether the string-wrapped variant applies.
    #[must_use]
    pub fn test_wrapping_in_string(&self) -> bool {
        self.test_wrapping_in_string
    }

    /// Whether the disable-command variant applies.
    #[must_use]
    pub fn test_disable_command(&self) -> bool {
        self.test_disable_command
    }

    /// Whether this example runs on Linux.
    #[must_use]
    pub fn test_on_linux(&self) -> bool {
        self.test_on_linux
    }

    /// Whether this example is focused (restricting the harness run).
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replaces the code, keeping flags and provenance. Used by the harness
    /// to synthesize variants.
    #[must_use]
    pub fn with_code(&self, code: impl Into<String>) -> Self {
        let mut example = self.clone();
        example.code = code.into();
        example
    }

    /// Attaches per-example rule configuration.
    #[must_use]
    pub fn with_config(mut self, configuration: toml::Value) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Marks this example as focused.
    #[must_use]
    pub fn focus(mut self) -> Self {
        self.focused = true;
        self
    }

    /// Skips the multi-byte offset and shebang variants.
    #[must_use]
    pub fn skip_multi_byte_offsets(mut self) -> Self {
        self.test_multi_byte_offsets = false;
        self
    }

    /// Skips the comment-wrapped variant.
    #[must_use]
    pub fn skip_wrapping_in_comment(mut self) -> Self {
        self.test_wrapping_in_comment = false;
        self
    }

    /// Skips the string-wrapped variant.
    #[must_use]
    pub fn skip_wrapping_in_string(mut self) -> Self {
        self.test_wrapping_in_string = false;
        self
    }

    /// Skips the disable-command variant.
    #[must_use]
    pub fn skip_disable_command(mut self) -> Self {
        self.test_disable_command = false;
        self
    }

    /// Skips this example on Linux.
    #[must_use]
    pub fn skip_on_linux(mut self) -> Self {
        self.test_on_linux = false;
        self
    }

    /// Strips violation markers, returning the clean code and the expected
    /// character offsets.
    #[must_use]
    pub fn strip_markers(&self) -> (String, Vec<usize>) {
        strip_markers(&self.code)
    }

    /// Whether the code embeds any violation markers.
    #[must_use]
    pub fn has_markers(&self) -> bool {
        self.code.contains(VIOLATION_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markers_records_post_strip_offsets() {
        let (clean, offsets) = strip_markers("ab↓cd↓e");
        assert_eq!(clean, "abcde");
        assert_eq!(offsets, vec![2, 4]);
    }

    #[test]
    fn strip_markers_counts_scalars_not_bytes() {
        let (clean, offsets) = strip_markers("é↓x");
        assert_eq!(clean, "éx");
        assert_eq!(offsets, vec![1]);
    }

    #[test]
    fn strip_markers_handles_adjacent_markers() {
        let (clean, offsets) = strip_markers("↓↓ab");
        assert_eq!(clean, "ab");
        assert_eq!(offsets, vec![0, 0]);
    }

    #[test]
    fn markerless_code_is_untouched() {
        let (clean, offsets) = strip_markers("switch x {\n}");
        assert_eq!(clean, "switch x {\n}");
        assert!(offsets.is_empty());
    }

    #[test]
    fn example_records_provenance() {
        let example = Example::new("//");
        let (file, line) = example.provenance();
        assert!(file.ends_with("example.rs"));
        assert!(line > 0);
    }

    #[test]
    fn variant_code_keeps_flags_and_provenance() {
        let example = Example::new("↓x").skip_disable_command();
        let variant = example.with_code(format!("// prefix\n{}", example.code()));
        assert!(!variant.test_disable_command());
        assert_eq!(variant.provenance(), example.provenance());
        assert!(variant.has_markers());
    }
}
