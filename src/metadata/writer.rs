use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TraitsmithError, TraitsmithResult};
use crate::metadata::document::MetadataDocument;

/// Writes one `<serial>.json` file per item into a directory.
#[derive(Clone, Debug)]
pub struct MetadataWriter {
    dir: PathBuf,
}

impl MetadataWriter {
    /// Create the writer, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> TraitsmithResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `serial`.
    pub fn path_for(&self, serial: u64) -> PathBuf {
        self.dir.join(format!("{serial}.json"))
    }

    /// Write `doc` as pretty JSON. On failure the file is removed.
    pub fn write(&self, serial: u64, doc: &MetadataDocument) -> TraitsmithResult<PathBuf> {
        let path = self.path_for(serial);
        let file = File::create(&path).map_err(|e| {
            TraitsmithError::io(format!("create metadata file '{}': {e}", path.display()))
        })?;
        let pending = PendingFile(Some(path));

        let mut w = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut w, doc)
            .map_err(|e| TraitsmithError::serde(format!("encode metadata #{serial}: {e}")))?;
        w.flush().map_err(|e| {
            TraitsmithError::io(format!("write metadata file '{}': {e}", pending.display()))
        })?;

        Ok(pending.keep())
    }

    /// Remove any output for `serial`. Missing files are not an error.
    pub fn discard(&self, serial: u64) -> TraitsmithResult<()> {
        let path = self.path_for(serial);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TraitsmithError::io(format!(
                "remove metadata file '{}': {e}",
                path.display()
            ))),
        }
    }
}

/// Deletes the file on drop unless [`PendingFile::keep`] was called.
struct PendingFile(Option<PathBuf>);

impl PendingFile {
    fn keep(mut self) -> PathBuf {
        self.0.take().unwrap_or_default()
    }

    fn display(&self) -> std::path::Display<'_> {
        self.0.as_deref().unwrap_or(Path::new("")).display()
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/writer.rs"]
mod tests;
