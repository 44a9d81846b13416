//! Filesystem-based record store backend.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::RegistrationRecord;
use crate::error::{Result, StorageError};
use crate::traits::RecordStore;

/// Filesystem-based record store.
///
/// All records live in one pretty-printed JSON array. A sidecar lock file
/// next to it coordinates access between requests and between processes:
///
/// ```text
/// data/
/// +-- registrations.json        JSON array of records
/// +-- registrations.json.lock   shared for reads, exclusive for appends
/// ```
///
/// Appends hold the exclusive lock for the whole read-modify-write cycle and
/// replace the store through a rename, so a reader never observes a
/// truncated document.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    path: PathBuf,
}

impl FilesystemStore {
    /// Create a store backed by the JSON file at `path`.
    ///
    /// Nothing is touched on disk until the first append.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn open_lock(&self) -> Result<File> {
        let path = self.lock_path();
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StorageError::Lock { path, source })
    }

    fn load_blocking(&self) -> Result<Vec<RegistrationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let lock = self.open_lock()?;
        FileExt::lock_shared(&lock).map_err(|source| StorageError::Lock {
            path: self.lock_path(),
            source,
        })?;

        // The lock is released when `lock` is dropped.
        let records = match self.read_raw()? {
            Some(content) => match parse_entries(&self.path, &content) {
                Ok(entries) => records_from_entries(entries),
                Err(err) => {
                    warn!(error = %err, "Record store is unreadable, treating it as empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Ok(records)
    }

    fn append_blocking(&self, record: RegistrationRecord) -> Result<usize> {
        let dir = self.directory();
        fs::create_dir_all(dir).map_err(|source| StorageError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let lock = self.open_lock()?;
        FileExt::lock_exclusive(&lock).map_err(|source| StorageError::Lock {
            path: self.lock_path(),
            source,
        })?;

        self.append_locked(record)
    }

    /// Read-modify-write of the whole document. Caller holds the exclusive lock.
    ///
    /// Existing entries are written back exactly as they were parsed, so
    /// legacy values the record type cannot represent survive the append.
    fn append_locked(&self, record: RegistrationRecord) -> Result<usize> {
        let mut entries = match self.read_raw()? {
            Some(content) => match parse_entries(&self.path, &content) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(error = %err, "Record store is unreadable, starting a new record list");
                    self.preserve_unreadable(&content);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let record =
            serde_json::to_value(&record).map_err(|source| StorageError::Serialize { source })?;
        entries.push(record);
        self.write_entries(&entries)?;

        Ok(entries.iter().filter(|entry| entry.is_object()).count())
    }

    fn read_raw(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_entries(&self, entries: &[Value]) -> Result<()> {
        let content =
            serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Serialize { source })?;

        let write_error = |source: io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(self.directory()).map_err(write_error)?;
        file.write_all(&content).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;

        // Temp files are created owner-only; keep whatever the store had.
        if let Ok(metadata) = fs::metadata(&self.path) {
            let _ = fs::set_permissions(file.path(), metadata.permissions());
        }

        file.persist(&self.path).map_err(|e| write_error(e.error))?;
        Ok(())
    }

    /// Keep a copy of an unreadable store before it is replaced.
    fn preserve_unreadable(&self, content: &[u8]) {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(
            ".corrupt-{}",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f")
        ));
        let backup = PathBuf::from(name);

        match fs::write(&backup, content) {
            Ok(()) => warn!(backup = %backup.display(), "Saved copy of unreadable record store"),
            Err(e) => warn!(error = %e, "Failed to save copy of unreadable record store"),
        }
    }
}

/// Parse the content of a store file into its raw entries.
///
/// Empty or whitespace-only content is an empty store. Anything other than a
/// JSON array is [`StorageError::CorruptStore`].
pub fn parse_entries(path: &Path, content: &[u8]) -> Result<Vec<Value>> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(content).map_err(|source| StorageError::CorruptStore {
        path: path.to_path_buf(),
        source,
    })
}

/// Records among the raw entries of a store, in order.
///
/// Entries that are not JSON objects are skipped.
pub fn records_from_entries(entries: Vec<Value>) -> Vec<RegistrationRecord> {
    let total = entries.len();
    let records: Vec<RegistrationRecord> = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            "Record store contains entries that are not records"
        );
    }
    records
}

#[async_trait]
impl RecordStore for FilesystemStore {
    async fn append(&self, record: RegistrationRecord) -> Result<usize> {
        let store = self.clone();
        let len = tokio::task::spawn_blocking(move || store.append_blocking(record))
            .await
            .map_err(|source| StorageError::Task { source })??;

        debug!(path = %self.path.display(), records = len, "Appended registration");
        Ok(len)
    }

    async fn load_all(&self) -> Result<Vec<RegistrationRecord>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.load_blocking())
            .await
            .map_err(|source| StorageError::Task { source })?
    }
}
