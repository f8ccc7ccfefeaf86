//! Buffers for example code, in memory or backed by a scratch file.

use std::io;

use style_lint_core::Buffer;
use tempfile::NamedTempFile;

/// A buffer holding one example's code, optionally persisted to a uniquely
/// named scratch file with the linted language's extension. The file is
/// removed when the fixture is dropped.
#[derive(Debug)]
pub struct Fixture {
    buffer: Buffer,
    file: Option<NamedTempFile>,
}

impl Fixture {
    /// Creates a fixture for `code`, writing it to disk when `on_disk` is
    /// set.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the scratch file cannot be
    /// created or read back.
    pub fn new(code: &str, on_disk: bool) -> io::Result<Self> {
        if !on_disk {
            return Ok(Self {
                buffer: Buffer::new(code),
                file: None,
            });
        }
        let file = tempfile::Builder::new()
            .prefix("style-lint-")
            .suffix(".swift")
            .tempfile()?;
        std::fs::write(file.path(), code)?;
        let buffer = Buffer::from_path(file.path())?;
        Ok(Self {
            buffer,
            file: Some(file),
        })
    }

    /// The fixture's buffer.
    #[must_use]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Mutable access for corrections.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Re-reads the scratch file from disk, `None` for in-memory fixtures.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    pub fn reread(&self) -> io::Result<Option<String>> {
        self.file
            .as_ref()
            .map(|file| std::fs::read_to_string(file.path()))
            .transpose()
    }
}
