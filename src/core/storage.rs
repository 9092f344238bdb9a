//! Key-value persistence for the content document
//!
//! The document lives under one fixed key in a [`KeyValueStore`]. Startup
//! loading never fails: a missing or unreadable record yields the demo
//! document. Saving never fails either; write errors are logged and the
//! in-memory document stays authoritative for the session.

#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

use anyhow::{Context, Result};

use super::content::ContentDocument;
use super::error::{ContentError, StorageError};

/// Storage slot holding the persisted document
pub const STORAGE_KEY: &str = "modern_portfolio_site_v1";

/// Suggested file name for exports
pub const EXPORT_FILE_NAME: &str = "portfolio_config.json";

/// A string-to-string storage slot, the native stand-in for browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<key>.json` in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            // Write beside the target and rename so a crash never leaves half a record
            let tmp = self.dir.join(format!("{}.json.tmp", key));
            fs::write(&tmp, value)?;
            fs::rename(&tmp, self.path_for(key))
        };
        write().map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

/// In-process store; can be told to fail writes
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, as when storage quota is exhausted
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "quota exceeded"),
            });
        }
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the content document through a [`KeyValueStore`]
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Persist under [`STORAGE_KEY`]
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Load the stored document, falling back to the demo document
    pub fn load(&self) -> ContentDocument {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("No stored content under {}, using demo", self.key);
                return ContentDocument::demo();
            }
            Err(e) => {
                tracing::warn!("Load failed, falling back to demo: {}", e);
                return ContentDocument::demo();
            }
        };

        match ContentDocument::from_json(&raw) {
            Ok(doc) => {
                tracing::info!("Loaded content with {} projects", doc.projects.len());
                doc
            }
            Err(e) => {
                tracing::warn!("Stored content is corrupt, falling back to demo: {}", e);
                ContentDocument::demo()
            }
        }
    }

    /// Write the document through to storage.
    ///
    /// Returns whether the write succeeded; failures are logged, never raised.
    pub fn save(&self, doc: &ContentDocument) -> bool {
        let json = match doc.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Save failed, could not serialize content: {}", e);
                return false;
            }
        };
        match self.store.set(&self.key, &json) {
            Ok(()) => {
                tracing::debug!("Saved content ({} bytes)", json.len());
                true
            }
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                false
            }
        }
    }
}

/// Serialize for download as pretty-printed JSON
pub fn export_to_bytes(doc: &ContentDocument) -> Result<Vec<u8>, ContentError> {
    Ok(doc.to_json_pretty()?.into_bytes())
}

/// Parse an uploaded file; malformed input is reported to the caller
pub fn import_from_bytes(bytes: &[u8]) -> Result<ContentDocument, ContentError> {
    let text = String::from_utf8(bytes.to_vec())?;
    // Editors on Windows often prepend a byte-order mark
    ContentDocument::from_json(text.strip_prefix('\u{FEFF}').unwrap_or(&text))
}

/// Export to a file on disk
pub fn export_to_path(doc: &ContentDocument, path: &Path) -> Result<()> {
    let bytes = export_to_bytes(doc)?;
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    tracing::info!("Exported content to: {}", path.display());
    Ok(())
}

/// Import from a file on disk
pub fn import_from_path(path: &Path) -> Result<ContentDocument> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read import: {}", path.display()))?;
    let doc = import_from_bytes(&bytes)
        .with_context(|| format!("Invalid content file: {}", path.display()))?;
    tracing::info!("Imported content from: {}", path.display());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::edit;

    #[test]
    fn test_load_without_record_returns_demo() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load(), ContentDocument::demo());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let persistence = Persistence::new(MemoryStore::new());
        let doc = edit::set_site_field(
            &ContentDocument::demo(),
            crate::core::content::SiteField::About,
            "Changed",
        );
        assert!(persistence.save(&doc));
        assert_eq!(persistence.load(), doc);
    }

    #[test]
    fn test_corrupt_record_falls_back_to_demo() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let persistence = Persistence::new(store);
        assert_eq!(persistence.load(), ContentDocument::demo());
    }

    #[test]
    fn test_record_failing_schema_falls_back_to_demo() {
        for raw in [
            r#"{"projects":[{"id":"a"},{"id":"a"}]}"#,
            r#"{"site":{"heroTitle":1}}"#,
            "[]",
        ] {
            let store = MemoryStore::new();
            store.set(STORAGE_KEY, raw).unwrap();
            assert_eq!(Persistence::new(store).load(), ContentDocument::demo());
        }
    }

    #[test]
    fn test_unreadable_record_falls_back_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(format!("{}.json", STORAGE_KEY))).unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.get(STORAGE_KEY),
            Err(StorageError::Read { .. })
        ));
        assert_eq!(Persistence::new(store).load(), ContentDocument::demo());
    }

    #[test]
    fn test_failed_write_is_reported_not_raised() {
        let persistence = Persistence::new(MemoryStore::failing());
        assert!(!persistence.save(&ContentDocument::default()));
        assert_eq!(persistence.load(), ContentDocument::demo());
    }

    #[test]
    fn test_demo_add_project_survives_reload() {
        let persistence = Persistence::new(MemoryStore::new());
        let demo = persistence.load();
        let (doc, id) = edit::add_project(&demo);
        persistence.save(&doc);

        let loaded = persistence.load();
        assert_eq!(loaded.projects.len(), 3);
        assert_eq!(loaded.projects[0].id, id);
        assert!(demo.projects.iter().all(|p| p.id != id));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "value").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("value".to_string()));
        assert!(dir.path().join("nested").join("k.json").exists());
        assert!(!dir.path().join("nested").join("k.json.tmp").exists());
    }

    #[test]
    fn test_file_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = Persistence::new(FileStore::new(dir.path()));
        let (doc, _) = edit::add_project(&ContentDocument::demo());
        assert!(persistence.save(&doc));
        assert_eq!(persistence.load(), doc);
    }

    #[test]
    fn test_export_is_pretty_and_reimportable() {
        let doc = ContentDocument::demo();
        let bytes = export_to_bytes(&doc).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\n  \"site\""));
        assert_eq!(import_from_bytes(&bytes).unwrap(), doc);
    }

    #[test]
    fn test_import_rejects_malformed_input() {
        assert!(matches!(
            import_from_bytes(b"{\"projects\": [}"),
            Err(ContentError::Parse(_))
        ));
        assert!(matches!(
            import_from_bytes(&[0xff, 0xfe]),
            Err(ContentError::Encoding(_))
        ));
    }

    #[test]
    fn test_import_accepts_partial_document() {
        let doc = import_from_bytes(br#"{"site":{"heroTitle":"X"}}"#).unwrap();
        assert_eq!(doc.site.hero_title, "X");
        assert!(doc.projects.is_empty());
    }

    #[test]
    fn test_import_accepts_utf8_bom() {
        let doc =
            import_from_bytes(b"\xEF\xBB\xBF{\"site\":{\"heroTitle\":\"X\"},\"projects\":[]}")
                .unwrap();
        assert_eq!(doc.site.hero_title, "X");
        assert!(doc.projects.is_empty());
    }

    #[test]
    fn test_path_export_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        export_to_path(&ContentDocument::demo(), &path).unwrap();
        assert_eq!(import_from_path(&path).unwrap(), ContentDocument::demo());
        assert!(import_from_path(&dir.path().join("missing.json")).is_err());
    }
}
