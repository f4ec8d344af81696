//! Corpus discovery and document reading.
//!
//! The engine never touches the filesystem; this module supplies it with
//! (path, text) pairs. Discovery walks a root directory for Markdown and
//! YAML files, honoring the skip-folder list and the special-case exclusion
//! of the rename announcement file. Reads tolerate a UTF-8 byte-order mark;
//! the stripped text is what the pipeline (and change detection) sees.

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// UTF-8 byte-order mark tolerated on read, never written back.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// The rename announcement file is supposed to keep the legacy name.
const ANNOUNCEMENT_FILE: &str = "new-name.md";

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to walk corpus root: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },
}

/// Which document kinds a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Markdown,
    Yaml,
    All,
}

/// The kind of one discovered document, which selects the replacement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocKind {
    Markdown,
    Yaml,
}

impl DocKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") => Some(DocKind::Markdown),
            Some("yml") | Some("yaml") => Some(DocKind::Yaml),
            _ => None,
        }
    }

    fn admitted_by(self, filter: KindFilter) -> bool {
        matches!(
            (self, filter),
            (_, KindFilter::All)
                | (DocKind::Markdown, KindFilter::Markdown)
                | (DocKind::Yaml, KindFilter::Yaml)
        )
    }
}

/// Walk `root` and return the documents to process, sorted by path.
///
/// Directories whose file name appears in `skip_folders` are pruned whole;
/// any file whose name contains the announcement file name is excluded.
pub fn discover(
    root: &Path,
    filter: KindFilter,
    skip_folders: &[String],
) -> Result<Vec<(PathBuf, DocKind)>, CorpusError> {
    let mut documents = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if !entry.file_type().is_dir() {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        !skip_folders.iter().any(|skip| skip == name.as_ref())
    });

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.contains(ANNOUNCEMENT_FILE) {
            continue;
        }
        if let Some(kind) = DocKind::from_path(entry.path()) {
            if kind.admitted_by(filter) {
                documents.push((entry.path().to_path_buf(), kind));
            }
        }
    }

    documents.sort();
    Ok(documents)
}

/// Read one document, stripping a leading UTF-8 BOM if present.
///
/// A document that is not valid UTF-8 yields [`CorpusError::Encoding`];
/// callers skip it and continue with the rest of the batch.
pub fn read_document(path: &Path) -> Result<String, CorpusError> {
    let bytes = fs::read(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let bytes = match bytes.strip_prefix(UTF8_BOM) {
        Some(stripped) => {
            warn!("{}: stripped UTF-8 BOM on read", path.display());
            stripped.to_vec()
        }
        None => bytes,
    };

    String::from_utf8(bytes).map_err(|_| CorpusError::Encoding {
        path: path.to_path_buf(),
    })
}
