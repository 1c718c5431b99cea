//! FILENAME: src/download.rs
//! PURPOSE: File-save port for finished CSV documents.
//! CONTEXT: The save target is abstracted behind the `FileSaver` trait so
//! encoder and guard logic stay testable without a real filesystem or host
//! environment. Failures are not recovered here; they surface to the caller.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::error::ExportError;

/// Narrow port through which a finished document leaves the library.
pub trait FileSaver {
    fn save(&mut self, filename: &str, contents: &[u8]) -> Result<(), ExportError>;
}

/// Saves documents under a target directory on the local filesystem.
///
/// Content is staged in a named temp file and persisted to the final name
/// only once fully written, so a failed save never leaves a partial file
/// behind; the temp file is removed on drop if any step errors.
pub struct FsFileSaver {
    target_dir: PathBuf,
}

impl FsFileSaver {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }
}

impl FileSaver for FsFileSaver {
    fn save(&mut self, filename: &str, contents: &[u8]) -> Result<(), ExportError> {
        fs::create_dir_all(&self.target_dir)?;

        let mut temp = NamedTempFile::new_in(&self.target_dir)?;
        temp.write_all(contents)?;
        temp.flush()?;

        let path = self.target_dir.join(filename);
        temp.persist(&path).map_err(|e| {
            log::warn!("failed to persist CSV export to {}: {}", path.display(), e.error);
            ExportError::Io(e.error)
        })?;

        log::debug!("saved CSV export to {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

/// Hands a finished CSV document to the file-save port under `filename`,
/// appending a `.csv` extension when missing.
///
/// Filenames containing path separators are rejected; everything else is
/// delegated to the saver unmodified, and saver failures propagate
/// untouched.
pub fn download_csv_file<S: FileSaver + ?Sized>(
    saver: &mut S,
    csv_content: &str,
    filename: &str,
) -> Result<(), ExportError> {
    if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
        return Err(ExportError::InvalidFilename(filename.to_string()));
    }

    let filename = if filename.ends_with(".csv") {
        filename.to_string()
    } else {
        format!("{filename}.csv")
    };

    saver.save(&filename, csv_content.as_bytes())
}
