//! Mutable source buffer with a line index and cached syntax map.

use crate::classifier::{SourceClassifier, SyntaxClassifier, SyntaxKind, SyntaxSpan};
use crate::directives::DisabledRegions;
use crate::types::Location;

use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Error persisting a buffer back to storage.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The buffer is not backed by a file.
    #[error("buffer is not backed by a file")]
    NoPath,
    /// The underlying storage could not be written.
    #[error("failed to write corrected contents to `{path}`: {source}")]
    Io {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// One line of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line number (1-indexed).
    pub number: usize,
    /// Byte range of the line content, excluding the terminator.
    pub content: Range<usize>,
    /// Character offset of the line start from the buffer start.
    pub char_start: usize,
}

/// The mutable in-memory representation of one source file's text, plus its
/// line index and syntax classification.
///
/// Character offsets and [`Location`]s are counted in Unicode scalar values;
/// ranges handed to pattern matching and edits are byte ranges. Mutation via
/// [`Buffer::set_contents`] rebuilds the line index and syntax map in one
/// pass; it never writes to disk, callers commit with [`Buffer::persist`].
#[derive(Clone)]
pub struct Buffer {
    contents: String,
    path: Option<PathBuf>,
    classifier: Arc<dyn SyntaxClassifier>,
    lines: Vec<Line>,
    syntax_map: Vec<SyntaxSpan>,
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("contents", &self.contents)
            .field("path", &self.path)
            .field("lines", &self.lines.len())
            .finish_non_exhaustive()
    }
}

impl Buffer {
    /// Creates an in-memory buffer with the default classifier.
    #[must_use]
    pub fn new(contents: impl Into<String>) -> Self {
        Self::with_classifier(contents, Arc::new(SourceClassifier))
    }

    /// Creates an in-memory buffer with an injected classifier.
    #[must_use]
    pub fn with_classifier(
        contents: impl Into<String>,
        classifier: Arc<dyn SyntaxClassifier>,
    ) -> Self {
        let contents = contents.into();
        let lines = index_lines(&contents);
        let syntax_map = classifier.classify(&contents);
        Self {
            contents,
            path: None,
            classifier,
            lines,
            syntax_map,
        }
    }

    /// Creates a file-backed buffer by reading `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        let mut buffer = Self::new(contents);
        buffer.path = Some(path);
        Ok(buffer)
    }

    /// Raw buffer contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Backing file path, when file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The line index.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Content of the 1-indexed line `number`, without its terminator.
    #[must_use]
    pub fn line_content(&self, number: usize) -> Option<&str> {
        self.lines
            .get(number.checked_sub(1)?)
            .map(|line| &self.contents[line.content.clone()])
    }

    /// Replaces the contents, rebuilding the line index and syntax map.
    pub fn set_contents(&mut self, contents: String) {
        self.lines = index_lines(&contents);
        self.syntax_map = self.classifier.classify(&contents);
        self.contents = contents;
    }

    /// Writes the contents back to the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::NoPath`] for in-memory buffers and
    /// [`WriteError::Io`] when the write fails; the in-memory contents are
    /// unaffected either way.
    pub fn persist(&self) -> Result<(), WriteError> {
        let Some(path) = &self.path else {
            return Err(WriteError::NoPath);
        };
        std::fs::write(path, &self.contents).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })
    }

    /// Converts a character offset into a [`Location`] carrying this
    /// buffer's path.
    #[must_use]
    pub fn location_at(&self, char_offset: usize) -> Location {
        let idx = self
            .lines
            .partition_point(|line| line.char_start <= char_offset)
            .saturating_sub(1);
        let line = &self.lines[idx];
        Location::new(Some(line.number), Some(char_offset - line.char_start + 1))
            .with_file(self.path.clone())
    }

    /// Converts a byte offset into a character offset.
    #[must_use]
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        let byte_offset = byte_offset.min(self.contents.len());
        let idx = self
            .lines
            .partition_point(|line| line.content.start <= byte_offset)
            .saturating_sub(1);
        let line = &self.lines[idx];
        line.char_start + self.contents[line.content.start..byte_offset].chars().count()
    }

    /// 1-indexed line number containing the byte offset.
    #[must_use]
    pub fn line_of_byte(&self, byte_offset: usize) -> usize {
        let idx = self
            .lines
            .partition_point(|line| line.content.start <= byte_offset)
            .saturating_sub(1);
        self.lines[idx].number
    }

    /// Labels a byte range with a single syntax kind.
    ///
    /// A range is a comment or string iff it lies entirely within one
    /// comment or string span; a range spanning mixed kinds is code.
    #[must_use]
    pub fn classify(&self, range: &Range<usize>) -> SyntaxKind {
        let idx = self
            .syntax_map
            .partition_point(|span| span.range.start <= range.start);
        let Some(span) = idx.checked_sub(1).and_then(|i| self.syntax_map.get(i)) else {
            return SyntaxKind::Code;
        };
        if span.kind != SyntaxKind::Code && range.end <= span.range.end {
            span.kind
        } else {
            SyntaxKind::Code
        }
    }

    /// Runs a pattern over the contents, dropping matches the classifier
    /// labels with one of `excluded`.
    #[must_use]
    pub fn match_pattern(&self, pattern: &Regex, excluded: &[SyntaxKind]) -> Vec<Range<usize>> {
        pattern
            .find_iter(&self.contents)
            .map(|m| m.range())
            .filter(|range| !excluded.contains(&self.classify(range)))
            .collect()
    }

    /// Drops ranges whose start falls within a region disabled for any of
    /// the rule's `identifiers` (canonical identifier plus aliases).
    #[must_use]
    pub fn rule_enabled(
        &self,
        ranges: Vec<Range<usize>>,
        identifiers: &[&str],
    ) -> Vec<Range<usize>> {
        let regions = DisabledRegions::scan(&self.contents);
        if regions.is_empty() {
            return ranges;
        }
        ranges
            .into_iter()
            .filter(|range| {
                regions
                    .suppressor_of(identifiers, self.line_of_byte(range.start))
                    .is_none()
            })
            .collect()
    }
}

fn index_lines(contents: &str) -> Vec<Line> {
    let bytes = contents.as_bytes();
    let mut lines = Vec::new();
    let mut byte_start = 0usize;
    let mut char_start = 0usize;
    let mut number = 1usize;

    loop {
        if byte_start >= bytes.len() {
            if lines.is_empty() {
                lines.push(Line {
                    number: 1,
                    content: 0..0,
                    char_start: 0,
                });
            }
            break;
        }
        let rel = bytes[byte_start..].iter().position(|&b| b == b'\n');
        let content_end = rel.map_or(bytes.len(), |r| byte_start + r);
        lines.push(Line {
            number,
            content: byte_start..content_end,
            char_start,
        });
        let Some(r) = rel else { break };
        char_start += contents[byte_start..=byte_start + r].chars().count();
        byte_start += r + 1;
        number += 1;
    }
    lines
}
