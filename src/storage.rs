//! Local persistence of the in-progress draft
//!
//! Drafts live in a namespaced key-value store holding JSON text. The file
//! backend keeps one `<key>.json` file per key under its namespace directory.

use crate::state::ApplicationDraft;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key under which the draft is stored
pub const DRAFT_KEY: &str = "loan-application-draft";

/// Minimal text key-value store
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Store keeping each key in its own file
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// Process-local store, used when no data directory is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the application draft
pub struct DraftStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl DraftStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            key: DRAFT_KEY.to_string(),
        }
    }

    /// File-backed store under `dir/drafts`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileStore::new(dir.into().join("drafts"))))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    /// Read the persisted draft merged over defaults.
    ///
    /// Returns `None` when nothing is stored or the stored text is unusable;
    /// problems are logged, never raised.
    pub fn load(&self) -> Option<ApplicationDraft> {
        let text = match self.backend.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("Could not read saved draft: {err:#}");
                return None;
            }
        };

        match ApplicationDraft::from_persisted(&text) {
            Ok(draft) => {
                tracing::info!("Restored saved draft");
                Some(draft)
            }
            Err(err) => {
                tracing::warn!("Ignoring corrupt saved draft: {err}");
                None
            }
        }
    }

    /// Overwrite the persisted draft
    pub fn save(&self, draft: &ApplicationDraft) -> Result<()> {
        let text = serde_json::to_string(draft)?;
        self.backend.set(&self.key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Gender;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_draft() -> ApplicationDraft {
        ApplicationDraft {
            phone: "0123 456 789".to_string(),
            first_name: "Иван".to_string(),
            gender: Gender::Female,
            amount: 800,
            ..Default::default()
        }
    }

    #[test]
    fn test_load_returns_none_when_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = DraftStore::in_dir(temp_dir.path());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_then_load_from_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = DraftStore::in_dir(temp_dir.path());
        store.save(&sample_draft()).unwrap();

        let path = temp_dir.path().join("drafts").join("loan-application-draft.json");
        assert!(path.exists());

        // A fresh store over the same directory sees the draft
        let reopened = DraftStore::in_dir(temp_dir.path());
        assert_eq!(reopened.load(), Some(sample_draft()));
    }

    #[test]
    fn test_last_save_wins() {
        let store = DraftStore::in_memory();
        store.save(&sample_draft()).unwrap();
        let mut updated = sample_draft();
        updated.term_days = 25;
        store.save(&updated).unwrap();
        assert_eq!(store.load().map(|d| d.term_days), Some(25));
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let drafts = temp_dir.path().join("drafts");
        fs::create_dir_all(&drafts).unwrap();
        fs::write(drafts.join("loan-application-draft.json"), r#"{"lastName":"Петров"}"#).unwrap();

        let draft = DraftStore::in_dir(temp_dir.path()).load().unwrap();
        assert_eq!(draft.last_name, "Петров");
        assert_eq!(draft.amount, 200);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let drafts = temp_dir.path().join("drafts");
        fs::create_dir_all(&drafts).unwrap();
        fs::write(drafts.join("loan-application-draft.json"), "{oops").unwrap();

        assert!(DraftStore::in_dir(temp_dir.path()).load().is_none());
    }

    #[test]
    fn test_backend_failures_are_reported_not_fatal() {
        let mut backend = MockKeyValueStore::new();
        backend
            .expect_get()
            .returning(|_| Err(anyhow::anyhow!("disk gone")));
        backend
            .expect_set()
            .withf(|key, _| key == DRAFT_KEY)
            .returning(|_, _| Err(anyhow::anyhow!("quota exceeded")));

        let store = DraftStore::new(Box::new(backend));
        assert!(store.load().is_none());
        assert!(store.save(&sample_draft()).is_err());
    }
}
