//! The content document store shared by every view
//!
//! Views read immutable snapshots and hand edits back to the store; each
//! accepted edit replaces the whole document and is written through to
//! storage before the next frame renders.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use super::content::{ContentDocument, ProjectId};
use super::edit::{self, Edit};
use super::error::ContentError;
use super::storage::{self, KeyValueStore, Persistence};

pub struct ContentStore<S> {
    document: Arc<ContentDocument>,
    persistence: Persistence<S>,
    last_save_ok: bool,
}

impl<S: KeyValueStore> ContentStore<S> {
    /// Load the current document through `persistence`
    pub fn open(persistence: Persistence<S>) -> Self {
        let document = Arc::new(persistence.load());
        Self {
            document,
            persistence,
            last_save_ok: true,
        }
    }

    /// Current document
    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    /// A handle to the current document that later edits will not change
    pub fn snapshot(&self) -> Arc<ContentDocument> {
        Arc::clone(&self.document)
    }

    /// Whether the most recent write-through reached storage
    pub fn last_save_ok(&self) -> bool {
        self.last_save_ok
    }

    /// Apply one edit and persist the result
    pub fn dispatch(&mut self, edit: &Edit) {
        let next = edit::apply(&self.document, edit);
        self.replace(next);
    }

    /// Add a placeholder project and return its id
    pub fn add_project(&mut self) -> ProjectId {
        let (next, id) = edit::add_project(&self.document);
        self.replace(next);
        id
    }

    /// Replace the document with raw JSON typed into the editor
    pub fn apply_raw_json(&mut self, raw: &str) -> Result<(), ContentError> {
        let next = edit::replace_whole_document(&self.document, raw)?;
        tracing::info!("Applied raw JSON ({} projects)", next.projects.len());
        self.replace(next);
        Ok(())
    }

    /// Replace the document with an uploaded file's contents
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        let next = storage::import_from_path(path)?;
        self.replace(next);
        Ok(())
    }

    pub fn export_file(&self, path: &Path) -> Result<()> {
        storage::export_to_path(&self.document, path)
    }

    /// Persist the current document again (the admin panel's explicit save)
    pub fn save(&mut self) -> bool {
        self.last_save_ok = self.persistence.save(&self.document);
        self.last_save_ok
    }

    fn replace(&mut self, next: ContentDocument) {
        if *self.document == next {
            return;
        }
        self.document = Arc::new(next);
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::SiteField;
    use crate::core::storage::MemoryStore;

    fn open_memory() -> ContentStore<MemoryStore> {
        ContentStore::open(Persistence::new(MemoryStore::new()))
    }

    #[test]
    fn test_open_empty_store_shows_demo() {
        let store = open_memory();
        assert_eq!(store.document(), &ContentDocument::demo());
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_edits() {
        let mut store = open_memory();
        let before = store.snapshot();
        store.dispatch(&Edit::SetSiteField(SiteField::HeroTitle, "New".to_string()));
        assert_eq!(before.site.hero_title, ContentDocument::demo().site.hero_title);
        assert_eq!(store.document().site.hero_title, "New");
    }

    #[test]
    fn test_dispatch_writes_through() {
        let mut store = open_memory();
        let id = store.add_project();
        assert_eq!(store.document().projects[0].id, id);
        assert!(store.last_save_ok());

        let reloaded = store.persistence.load();
        assert_eq!(&reloaded, store.document());
    }

    #[test]
    fn test_failed_write_keeps_session_state() {
        let mut store = ContentStore::open(Persistence::new(MemoryStore::failing()));
        store.dispatch(&Edit::SetSiteField(SiteField::About, "Kept".to_string()));
        assert!(!store.last_save_ok());
        assert_eq!(store.document().site.about, "Kept");
    }

    #[test]
    fn test_malformed_raw_json_leaves_document() {
        let mut store = open_memory();
        let before = store.snapshot();
        assert!(store.apply_raw_json("{\"site\": 3").is_err());
        assert_eq!(store.document(), before.as_ref());
    }

    #[test]
    fn test_import_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"site":{"heroTitle":"Imported"},"projects":[]}"#).unwrap();
        std::fs::write(&bad, "not json").unwrap();

        let mut store = open_memory();
        store.import_file(&good).unwrap();
        assert_eq!(store.document().site.hero_title, "Imported");
        assert!(store.document().projects.is_empty());

        assert!(store.import_file(&bad).is_err());
        assert_eq!(store.document().site.hero_title, "Imported");
    }

    #[test]
    fn test_export_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut store = open_memory();
        store.add_project();
        store.export_file(&path).unwrap();

        let mut other = open_memory();
        other.import_file(&path).unwrap();
        assert_eq!(other.document(), store.document());
    }
}
