//! Change-detecting atomic document writer.
//!
//! The final text is persisted only when it differs byte-for-byte from what
//! was read (after BOM stripping). Writes go through tempfile + fsync +
//! rename in the target directory, so a crash leaves either the old file or
//! the new one, never a torn write. Output is always plain UTF-8 with no
//! BOM: inputs are read tolerant of a leading marker, outputs drop it.

use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("path has no parent directory: {0}")]
    NoParent(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of offering one document's final text to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "WriteOutcome should be checked to count modified documents"]
pub enum WriteOutcome {
    /// The text changed and the file was rewritten.
    Written,
    /// The text was identical; the file was left alone.
    Unchanged,
}

/// Persist `text` to `path` if it differs from `original`.
pub fn write_if_changed(
    path: &Path,
    original: &str,
    text: &str,
) -> Result<WriteOutcome, OutputError> {
    if text == original {
        return Ok(WriteOutcome::Unchanged);
    }

    atomic_write(path, text.as_bytes())?;
    Ok(WriteOutcome::Written)
}

/// Atomic file write: tempfile in the same directory, fsync, rename.
fn atomic_write(path: &Path, content: &[u8]) -> Result<(), OutputError> {
    let parent = path
        .parent()
        .ok_or_else(|| OutputError::NoParent(path.to_path_buf()))?;

    let io_err = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(io_err)?;
    temp.write_all(content).map_err(io_err)?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

/// Render a unified line diff between the original and rebranded text,
/// headed by the document path. The caller decides where it goes (stdout,
/// a progress bar's suspend block).
pub fn render_diff(path: &Path, original: &str, rebranded: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{}",
        format!("--- {} (original)", path.display()).dimmed()
    );
    let _ = writeln!(
        out,
        "{}",
        format!("+++ {} (rebranded)", path.display()).dimmed()
    );

    for change in TextDiff::from_lines(original, rebranded).iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        let _ = write!(out, "{}", line);
    }
    out
}
