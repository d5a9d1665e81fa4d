//! The document store: one JSON object on disk, cached in memory

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::codec;
use crate::error::{Result, StoreError};
use crate::path::PathResolver;
use crate::value::PrefValue;

/// The in-memory document: top-level preference keys mapped to JSON values
pub type Document = Map<String, Value>;

/// Indentation used for the backing file
const INDENT: &[u8] = b"   ";

/// Persistent preference store backed by a single JSON file
///
/// The file is read on first use and cached; every mutation rewrites the whole
/// file before returning. Operations take `&mut self`, so they are applied one
/// at a time in call order.
///
/// Nothing guards against another process writing the same file. The last
/// full rewrite wins.
///
/// # Example
///
/// ```no_run
/// use prefs_store::{FixedPath, PrefStore, PrefValue};
///
/// # async fn run() -> prefs_store::Result<()> {
/// let mut store = PrefStore::new(FixedPath::new("/tmp/prefs.json"));
/// store.set_value("theme", "dark").await?;
///
/// let all = store.get_all().await?;
/// assert_eq!(all.get("theme"), Some(&PrefValue::from("dark")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PrefStore<R> {
    resolver: R,
    document: Option<Document>,
}

impl<R: PathResolver> PrefStore<R> {
    /// Create a store; nothing is read until the first operation
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            document: None,
        }
    }

    /// The resolved location of the backing file
    pub fn path(&self) -> Result<PathBuf> {
        self.resolver.resolve()
    }

    /// Load the document, reading the backing file if it is not cached yet
    ///
    /// A missing, empty or malformed file is replaced by an empty document,
    /// which is written back immediately.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ReadFailed`] if the file exists but cannot be
    /// read; it is not touched in that case. Returns
    /// [`StoreError::PersistenceFailed`] if a replacement cannot be written.
    pub async fn load(&mut self) -> Result<&Document> {
        self.document_mut().await.map(|document| &*document)
    }

    /// Drop the cached document and read the backing file again
    pub async fn reload(&mut self) -> Result<()> {
        self.document = None;
        self.load().await.map(|_| ())
    }

    /// Every stored preference, decoded
    ///
    /// Values with no [`PrefValue`] form (nested objects) come back as
    /// [`PrefValue::Null`].
    pub async fn get_all(&mut self) -> Result<BTreeMap<String, PrefValue>> {
        let document = self.load().await?;
        Ok(document
            .iter()
            .map(|(key, value)| (key.clone(), codec::decode(value)))
            .collect())
    }

    /// A single preference, if present
    pub async fn get(&mut self, key: &str) -> Result<Option<PrefValue>> {
        Ok(self.load().await?.get(key).map(codec::decode))
    }

    pub async fn contains_key(&mut self, key: &str) -> Result<bool> {
        Ok(self.load().await?.contains_key(key))
    }

    /// All stored keys in sorted order
    pub async fn keys(&mut self) -> Result<Vec<String>> {
        Ok(self.load().await?.keys().cloned().collect())
    }

    /// Insert or overwrite a preference and persist the document
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PersistenceFailed`] if the file cannot be written.
    /// The cached document is dropped in that case, so the next operation
    /// reads the file again.
    pub async fn set_value(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PrefValue>,
    ) -> Result<()> {
        let key = key.into();
        let value = value.into();
        let path = self.resolver.resolve()?;

        self.document_mut()
            .await?
            .insert(key.clone(), codec::encode(&value));
        self.commit(&path).await?;

        tracing::debug!(key = %key, kind = ?value.kind(), "Stored preference");
        Ok(())
    }

    /// Remove a preference and persist the document
    ///
    /// Removing an absent key is not an error. Returns whether the key was
    /// present.
    pub async fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.resolver.resolve()?;

        let existed = self.document_mut().await?.remove(key).is_some();
        self.commit(&path).await?;

        tracing::debug!(key, existed, "Removed preference");
        Ok(existed)
    }

    /// Replace the document with an empty one and persist it
    pub async fn clear(&mut self) -> Result<()> {
        let path = self.resolver.resolve()?;

        self.document = Some(Document::new());
        self.commit(&path).await?;

        tracing::debug!("Cleared preferences");
        Ok(())
    }

    async fn document_mut(&mut self) -> Result<&mut Document> {
        if self.document.is_none() {
            let path = self.resolver.resolve()?;
            let document = read_or_reset(&path).await?;
            self.document = Some(document);
        }
        Ok(self.document.get_or_insert_with(Document::new))
    }

    async fn commit(&mut self, path: &Path) -> Result<()> {
        let Some(document) = &self.document else {
            return Ok(());
        };

        let result = write_document(path, document).await;
        if let Err(err) = &result {
            tracing::warn!(path = %path.display(), %err, "Dropping cached preferences");
            self.document = None;
        }
        result
    }
}

/// Read the backing file, resetting it to `{}` when it holds no usable data
///
/// Only a missing, blank or unparseable file is reset. A file that exists but
/// cannot be read is left alone and reported as [`StoreError::ReadFailed`].
async fn read_or_reset(path: &Path) -> Result<Document> {
    let contents = match fs::read(path).await {
        Ok(contents) => contents,
        // A file standing in for a parent directory means there is no document
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            tracing::debug!(path = %path.display(), "No preference file yet");
            Vec::new()
        }
        Err(source) => {
            tracing::warn!(path = %path.display(), err = %source, "Failed to read preference file");
            return Err(StoreError::ReadFailed {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !contents.trim_ascii().is_empty() {
        match parse_document(&contents) {
            Ok(document) => {
                tracing::debug!(path = %path.display(), keys = document.len(), "Loaded preferences");
                return Ok(document);
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "Resetting preference file");
            }
        }
    }

    let document = Document::new();
    write_document(path, &document).await?;
    Ok(document)
}

fn parse_document(contents: &[u8]) -> Result<Document> {
    // Invalid UTF-8 and anything but a top-level object fail here
    serde_json::from_slice(contents).map_err(StoreError::MalformedDocument)
}

fn to_pretty_json(document: &Document) -> Result<Vec<u8>> {
    let mut contents = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut contents, PrettyFormatter::with_indent(INDENT));
    document
        .serialize(&mut serializer)
        .map_err(StoreError::Encode)?;
    Ok(contents)
}

/// Write the whole document next to the backing file, then move it into place
async fn write_document(path: &Path, document: &Document) -> Result<()> {
    let contents = to_pretty_json(document)?;
    let failed = |source: std::io::Error| StoreError::PersistenceFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await.map_err(failed)?;
    }

    let tmp_path = tmp_path(path);
    if let Err(err) = write_synced(&tmp_path, &contents).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(failed(err));
    }
    if let Err(err) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(failed(err));
    }

    tracing::debug!(path = %path.display(), keys = document.len(), "Persisted preferences");
    Ok(())
}

/// Write and flush to stable storage, so a rename never exposes an empty file
async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
