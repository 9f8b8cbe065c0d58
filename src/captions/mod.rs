//! Appends a style trigger to caption files.
//!
//! Every `.txt` file in the caption directory gets the trigger appended
//! once. Files that already end with it are left alone, so the job can be
//! re-run safely.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::{Result, SatcapError};

/// Configuration for the caption trigger job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Directory holding the caption `.txt` files
    pub dir: PathBuf,

    /// Appended verbatim, including any leading punctuation
    pub trigger: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("esa_summaries"),
            trigger: ", sat-art style".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionOutcome {
    Added,
    AlreadyPresent,
    Failed { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct CaptionReport {
    pub files: Vec<(PathBuf, CaptionOutcome)>,
}

impl CaptionReport {
    pub fn count(&self, outcome: &CaptionOutcome) -> usize {
        self.files
            .iter()
            .filter(|(_, o)| std::mem::discriminant(o) == std::mem::discriminant(outcome))
            .count()
    }

    pub fn added(&self) -> usize {
        self.count(&CaptionOutcome::Added)
    }

    pub fn already_present(&self) -> usize {
        self.count(&CaptionOutcome::AlreadyPresent)
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.added() - self.already_present()
    }
}

pub struct CaptionAppender {
    trigger: String,
}

impl CaptionAppender {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
        }
    }

    /// Process every `.txt` file in `dir`, in directory listing order.
    ///
    /// Fails only when `dir` itself cannot be listed; per-file problems are
    /// recorded in the report.
    pub fn append_all(&self, dir: &Path) -> Result<CaptionReport> {
        info!("Adding trigger to files in '{}'", dir.display());

        let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SatcapError::DirectoryNotFound(dir.to_path_buf()),
            _ => SatcapError::Io(e),
        })?;

        let mut report = CaptionReport::default();
        let files = text_files(
            dir,
            entries.map(|entry| entry.map(|e| e.path())),
            &mut report,
        );

        let total = files.len();

        for (i, path) in files.into_iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let outcome = match self.append(&path) {
                Ok(outcome) => outcome,
                Err(e) => CaptionOutcome::Failed {
                    reason: e.to_string(),
                },
            };

            match &outcome {
                CaptionOutcome::Added => info!("({}/{}) Added trigger to {}", i + 1, total, name),
                CaptionOutcome::AlreadyPresent => info!(
                    "({}/{}) Trigger already exists in {}. Skipping.",
                    i + 1,
                    total,
                    name
                ),
                CaptionOutcome::Failed { reason } => {
                    warn!("Could not process {}: {}", name, reason)
                }
            }

            report.files.push((path, outcome));
        }

        Ok(report)
    }

    /// Append the trigger to one file unless its content already ends with it.
    pub fn append(&self, path: &Path) -> Result<CaptionOutcome> {
        let content = fs::read_to_string(path)?;

        if content.trim_end().ends_with(&self.trigger) {
            return Ok(CaptionOutcome::AlreadyPresent);
        }

        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(self.trigger.as_bytes())?;

        Ok(CaptionOutcome::Added)
    }
}

/// Keep the `.txt` files among listed entries. Entries that could not be
/// read are recorded against `dir` as failures.
fn text_files(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
    report: &mut CaptionReport,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in entries {
        match entry {
            Ok(path) if path.is_file() && is_text_file(&path) => files.push(path),
            Ok(_) => {}
            Err(e) => {
                warn!("Could not read an entry of '{}': {}", dir.display(), e);
                report.files.push((
                    dir.to_path_buf(),
                    CaptionOutcome::Failed {
                        reason: e.to_string(),
                    },
                ));
            }
        }
    }

    files
}

fn is_text_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TRIGGER: &str = ", sat-art style";

    #[test]
    fn test_appends_once() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("desc_0001.txt");
        fs::write(&path, "a river delta").unwrap();

        let appender = CaptionAppender::new(TRIGGER);

        let first = appender.append_all(tmp.path()).unwrap();
        assert_eq!(first.added(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a river delta, sat-art style"
        );

        let second = appender.append_all(tmp.path()).unwrap();
        assert_eq!(second.added(), 0);
        assert_eq!(second.already_present(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a river delta, sat-art style"
        );
    }

    #[test]
    fn test_trailing_newline_counts_as_present() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.txt");
        fs::write(&path, "glacier, sat-art style\n").unwrap();

        let outcome = CaptionAppender::new(TRIGGER).append(&path).unwrap();

        assert_eq!(outcome, CaptionOutcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&path).unwrap(), "glacier, sat-art style\n");
    }

    #[test]
    fn test_ignores_other_extensions() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("image_0001.png"), b"png").unwrap();
        fs::write(tmp.path().join("notes.md"), "notes").unwrap();
        fs::create_dir(tmp.path().join("sub.txt")).unwrap();
        fs::write(tmp.path().join("desc_0001.txt"), "dunes").unwrap();

        let report = CaptionAppender::new(TRIGGER).append_all(tmp.path()).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(fs::read_to_string(tmp.path().join("notes.md")).unwrap(), "notes");
    }

    #[test]
    fn test_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("esa_summaries");

        let err = CaptionAppender::new(TRIGGER).append_all(&missing).unwrap_err();

        assert!(matches!(err, SatcapError::DirectoryNotFound(p) if p == missing));
    }

    #[test]
    fn test_unreadable_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.txt"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(tmp.path().join("good.txt"), "coastline").unwrap();

        let report = CaptionAppender::new(TRIGGER).append_all(tmp.path()).unwrap();

        assert_eq!(report.added(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_unreadable_entry_is_reported() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("desc_0001.txt");
        fs::write(&good, "delta").unwrap();

        let mut report = CaptionReport::default();
        let entries = vec![
            Ok(good.clone()),
            Err(io::Error::new(ErrorKind::PermissionDenied, "entry unreadable")),
            Ok(tmp.path().join("image_0001.png")),
        ];
        let files = text_files(tmp.path(), entries, &mut report);

        assert_eq!(files, vec![good]);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.files[0],
            (path, CaptionOutcome::Failed { reason }) if path == tmp.path() && reason.contains("entry unreadable")
        ));
    }
}
