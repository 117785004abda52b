//! Self-healing JSON document store.
//!
//! Each document lives in one file under the store's root directory. Loading
//! a missing file, or one that is not a JSON object, never fails: the store
//! writes the document's empty default in its place and returns that. A file
//! that is a JSON object is kept, with unreadable records tolerated by the
//! document model. Writes replace the whole file atomically (temp file +
//! rename), so readers never observe a partial write.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::model::Document;

/// Result of reading a backing file, before any healing.
#[derive(Debug)]
enum ReadOutcome<D> {
    /// `complete` is false when the file lacks some of the document's
    /// top-level keys.
    Parsed { document: D, complete: bool },
    Missing,
    Corrupt(serde_json::Error),
}

/// File-backed store for named JSON documents.
///
/// Read-modify-write sequences go through [`DocumentStore::update`], which
/// holds a per-document lock for the whole sequence. The lock is in-process
/// only; two processes sharing a root can still race.
#[derive(Debug)]
pub struct DocumentStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DocumentStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Backing file for the document called `name`.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Load a document, replacing a missing or malformed file with `D::default()`.
    pub fn load<D: Document>(&self, name: &str) -> Result<D, StoreError> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_or_heal(name)
    }

    /// Read a document without healing or writing anything.
    ///
    /// Returns `None` when the file does not exist and
    /// [`StoreError::Malformed`] when it cannot be parsed.
    pub fn inspect<D: Document>(&self, name: &str) -> Result<Option<D>, StoreError> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.path_of(name);
        match read_document::<D>(&path)? {
            ReadOutcome::Parsed { document, .. } => Ok(Some(document)),
            ReadOutcome::Missing => Ok(None),
            ReadOutcome::Corrupt(source) => Err(StoreError::Malformed { path, source }),
        }
    }

    /// Persist the full document, creating the root directory if needed.
    pub fn save<D: Document>(&self, name: &str, document: &D) -> Result<(), StoreError> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write(name, document)
    }

    /// Load, mutate, and save a document while holding its lock.
    ///
    /// The document is only written back when `f` returns `Ok`.
    pub fn update<D, T, E, F>(&self, name: &str, f: F) -> Result<T, E>
    where
        D: Document,
        E: From<StoreError>,
        F: FnOnce(&mut D) -> Result<T, E>,
    {
        let lock = self.lock_for(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut document: D = self.load_or_heal(name)?;
        let value = f(&mut document)?;
        self.write(name, &document)?;
        Ok(value)
    }

    fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(name.to_string()).or_default())
    }

    fn load_or_heal<D: Document>(&self, name: &str) -> Result<D, StoreError> {
        let path = self.path_of(name);
        match read_document::<D>(&path)? {
            ReadOutcome::Parsed {
                document,
                complete: true,
            } => {
                tracing::debug!(kind = D::KIND, path = %path.display(), "loaded document");
                Ok(document)
            }
            ReadOutcome::Parsed {
                document,
                complete: false,
            } => {
                tracing::debug!(
                    kind = D::KIND,
                    path = %path.display(),
                    "document lacks top-level keys, writing them"
                );
                self.write(name, &document)?;
                Ok(document)
            }
            ReadOutcome::Missing => {
                tracing::debug!(
                    kind = D::KIND,
                    path = %path.display(),
                    "document missing, writing empty default"
                );
                self.heal(name)
            }
            ReadOutcome::Corrupt(error) => {
                tracing::warn!(
                    kind = D::KIND,
                    path = %path.display(),
                    %error,
                    "document is malformed, replacing it with an empty default"
                );
                self.heal(name)
            }
        }
    }

    fn heal<D: Document>(&self, name: &str) -> Result<D, StoreError> {
        let document = D::default();
        self.write(name, &document)?;
        Ok(document)
    }

    fn write<D: Document>(&self, name: &str, document: &D) -> Result<(), StoreError> {
        let path = self.path_of(name);
        let json = serde_json::to_string_pretty(document).map_err(|source| {
            StoreError::Serialize {
                name: name.to_string(),
                source,
            }
        })?;

        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        fs::create_dir_all(&dir).map_err(|source| io_error(&dir, source))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|source| io_error(&dir, source))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|source| io_error(&path, source))?;
        tmp.persist(&path)
            .map_err(|e| io_error(&path, e.error))?;

        tracing::debug!(kind = D::KIND, path = %path.display(), "saved document");
        Ok(())
    }
}

/// Read and decode a backing file.
///
/// Syntax errors, truncation, and a root that is not an object count as
/// corrupt. Any object decodes, since the model tolerates bad records.
fn read_document<D: Document>(path: &Path) -> Result<ReadOutcome<D>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ReadOutcome::Missing),
        Err(source) => return Err(io_error(path, source)),
    };

    let raw: Value = match serde_json::from_slice(&bytes) {
        Ok(raw) => raw,
        Err(error) => return Ok(ReadOutcome::Corrupt(error)),
    };

    match D::deserialize(&raw) {
        Ok(document) => {
            let complete = has_all_keys(&document, &raw);
            Ok(ReadOutcome::Parsed { document, complete })
        }
        Err(error) if !raw.is_object() => Ok(ReadOutcome::Corrupt(error)),
        Err(source) => Err(StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Whether `raw` carries every top-level key `document` serializes.
fn has_all_keys<D: Document>(document: &D, raw: &Value) -> bool {
    match (serde_json::to_value(document), raw.as_object()) {
        (Ok(Value::Object(expected)), Some(raw)) => {
            expected.keys().all(|key| raw.contains_key(key))
        }
        _ => true,
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
