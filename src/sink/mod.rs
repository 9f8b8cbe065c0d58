use std::fs;
use std::path::{Path, PathBuf};

use crate::app::Result;

/// Writes numbered artifacts into one output directory.
///
/// File names are `<prefix><index:04><extension>`; existing files are
/// overwritten.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    prefix: String,
}

impl FileSink {
    /// Create the sink, creating `dir` if it does not exist yet.
    pub fn create(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            prefix: prefix.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, index: usize, extension: &str) -> PathBuf {
        self.dir
            .join(format!("{}{:04}{}", self.prefix, index, extension))
    }

    /// Write `text` as the whole UTF-8 content of `<prefix><index>.txt`.
    pub fn write(&self, index: usize, text: &str) -> Result<PathBuf> {
        self.write_bytes(index, ".txt", text.as_bytes())
    }

    pub fn write_bytes(&self, index: usize, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(index, extension);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}
