//! Immutable source snapshots and the context windows cut from them.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::ContextWindow;

/// Default maximum source file size (16 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

/// A file's content as it was when loaded, split into 0-indexed lines.
///
/// The snapshot is never mutated and never re-read; load a new document to
/// observe changes on disk. Every query in the crate borrows one of these.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Raw content, used for whole-document literal counts.
    content: String,
    /// Lines without their terminators.
    lines: Vec<String>,
    /// Where the content was read from (or claims to come from).
    path: PathBuf,
}

impl SourceDocument {
    /// The raw file content.
    pub fn content(&self) -> &str {
        return &self.content;
    }

    /// Build a `ContextWindow` of up to `radius` lines either side of `target`,
    /// clamped to the document bounds.
    pub fn context_window(&self, target: usize, radius: usize) -> ContextWindow {
        let end = target.saturating_add(radius).saturating_add(1).min(self.lines.len());
        let start = target.saturating_sub(radius).min(end);
        let lines = self
            .lines
            .get(start..end)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        return ContextWindow { lines, start };
    }

    /// Build a document from in-memory text. `path` is only used in diagnostics.
    pub fn from_source(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = content.lines().map(String::from).collect();
        return Self { content, lines, path: path.into() };
    }

    /// A single line by 0-based index.
    pub fn line(&self, index: usize) -> Option<&str> {
        return self.lines.get(index).map(String::as_str);
    }

    /// Number of lines in the snapshot.
    pub fn line_count(&self) -> usize {
        return self.lines.len();
    }

    /// All lines in order.
    pub fn lines(&self) -> &[String] {
        return &self.lines;
    }

    /// Read a file in full with the default size limit.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read or is not UTF-8,
    /// or `Error::FileTooLarge` if it exceeds [`DEFAULT_MAX_FILE_BYTES`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        return Self::load_with_limit(path, DEFAULT_MAX_FILE_BYTES);
    }

    /// Read a file in full, refusing files larger than `max_bytes`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be stat'ed, read or decoded,
    /// or `Error::FileTooLarge` if it exceeds `max_bytes`.
    pub fn load_with_limit(path: &Path, max_bytes: u64) -> Result<Self, Error> {
        let io_error = |source| return Error::Io { path: path.to_path_buf(), source };

        let size_bytes = std::fs::metadata(path).map_err(io_error)?.len();
        if size_bytes > max_bytes {
            return Err(Error::FileTooLarge {
                file: path.to_path_buf(),
                max_bytes,
                size_bytes,
            });
        }

        let content = std::fs::read_to_string(path).map_err(io_error)?;
        log::debug!("loaded {} ({size_bytes} bytes)", path.display());
        return Ok(Self::from_source(path, content));
    }

    /// The path the snapshot was read from.
    pub fn path(&self) -> &Path {
        return &self.path;
    }
}

/// Width of a line's leading whitespace, in characters.
pub(crate) fn indentation_width(line: &str) -> usize {
    return line.chars().take_while(|c| return c.is_whitespace()).count();
}
