//! # Mirror File
//!
//! Plain-text copy of the dispense log, kept where the operator can pick it up
//! (the downloads folder by default).
//!
//! ```text
//! Medicine Dispense Log
//! 2025-01-01 09:30:00 - Juan took 20 Paracetamol
//! 2025-01-01 09:41:12 - Maria took 5 Ibuprofen
//! ```
//!
//! The database is the record of truth. A failed append is reported to the
//! operator but never undoes the dispense, and nothing is retried.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use dispensary_core::{DispenseLogEntry, MIRROR_FILE_HEADER};

/// Appending to the mirror file failed.
#[derive(Debug, Error)]
#[error("{source} ({})", .path.display())]
pub struct MirrorError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Handle to the mirror file.
///
/// The path is resolved and the header written once at startup. Each append
/// then opens the file, writes one line and closes it again, so no descriptor
/// stays open between dispenses and a file removed mid-session comes back on
/// the next append (without a header).
#[derive(Debug, Clone)]
pub struct MirrorLog {
    path: PathBuf,
}

impl MirrorLog {
    /// Opens the mirror file, writing the header line if the file is absent.
    ///
    /// Failure to create the file is logged and otherwise ignored; the counter
    /// keeps running and later appends report their own errors.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let mirror = MirrorLog { path: path.into() };

        match mirror.create_with_header().await {
            Ok(true) => info!(path = %mirror.path.display(), "Created mirror file"),
            Ok(false) => debug!(path = %mirror.path.display(), "Mirror file already present"),
            Err(e) => warn!(
                path = %mirror.path.display(),
                error = %e,
                "Could not create mirror file, continuing without it"
            ),
        }

        mirror
    }

    /// Returns `Ok(true)` if the file was created just now.
    async fn create_with_header(&self) -> io::Result<bool> {
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e),
        };

        file.write_all(format!("{}\n", MIRROR_FILE_HEADER).as_bytes()).await?;
        file.flush().await?;
        Ok(true)
    }

    /// Appends one line for a committed dispense.
    pub async fn append(&self, entry: &DispenseLogEntry) -> Result<(), MirrorError> {
        let line = format!("{}\n", entry.mirror_line());
        let wrap = |source| MirrorError {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(wrap)?;
        file.write_all(line.as_bytes()).await.map_err(wrap)?;
        file.flush().await.map_err(wrap)?;

        debug!(log_id = entry.id, "Mirror line appended");
        Ok(())
    }

    /// Whether the mirror file is currently present on disk.
    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispensary_core::CivilTimestamp;

    fn entry(patient: &str, quantity: i64) -> DispenseLogEntry {
        DispenseLogEntry {
            id: 1,
            patient_name: patient.to_string(),
            medicine_name: "Paracetamol".to_string(),
            quantity,
            taken_at: "2025-01-01 09:30:00".parse::<CivilTimestamp>().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_open_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medicine_log.txt");

        let mirror = MirrorLog::open(&path).await;
        assert!(mirror.exists().await);
        MirrorLog::open(&path).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Medicine Dispense Log\n");
    }

    #[tokio::test]
    async fn test_append_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medicine_log.txt");
        let mirror = MirrorLog::open(&path).await;

        mirror.append(&entry("Juan", 20)).await.unwrap();
        mirror.append(&entry("Maria", 5)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Medicine Dispense Log\n\
             2025-01-01 09:30:00 - Juan took 20 Paracetamol\n\
             2025-01-01 09:30:00 - Maria took 5 Paracetamol\n"
        );
    }

    #[tokio::test]
    async fn test_existing_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medicine_log.txt");
        std::fs::write(&path, "Medicine Dispense Log\nolder line\n").unwrap();

        let mirror = MirrorLog::open(&path).await;
        mirror.append(&entry("Juan", 1)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Medicine Dispense Log\nolder line\n"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_append_reopens_removed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medicine_log.txt");
        let mirror = MirrorLog::open(&path).await;

        mirror.append(&entry("Juan", 20)).await.unwrap();
        std::fs::remove_file(&path).unwrap();
        mirror.append(&entry("Maria", 5)).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "2025-01-01 09:30:00 - Maria took 5 Paracetamol\n");
    }

    #[tokio::test]
    async fn test_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("medicine_log.txt");

        // Startup carries on without the file
        let mirror = MirrorLog::open(&path).await;
        assert!(!mirror.exists().await);

        let err = mirror.append(&entry("Juan", 1)).await.unwrap_err();
        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
    }
}
