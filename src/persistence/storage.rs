//! # Save Storage
//!
//! Backends that hold one serialized game.

use crate::{GridError, GridResult};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Durable home for a single serialized game.
pub trait SaveStore {
    /// Returns the saved text, or `None` if nothing has been saved.
    fn load(&self) -> GridResult<Option<String>>;

    /// Replaces the saved text.
    fn save(&mut self, data: &str) -> GridResult<()>;

    /// Removes the saved text, if any.
    fn clear(&mut self) -> GridResult<()>;
}

/// Stores the game as a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveStore for FileSaveStore {
    fn load(&self) -> GridResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, data: &str) -> GridResult<()> {
        if self.path.file_name().is_none() {
            return Err(GridError::Storage(format!(
                "save path {} does not name a file",
                self.path.display()
            )));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Readers only ever see a complete save
        let temp = self.temp_path();
        fs::write(&temp, data)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> GridResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the game in memory. Clones share the same slot, so a test can keep
/// a handle while the gateway owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(data: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(data.into()))),
        }
    }

    /// Returns a copy of the saved text.
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&self) -> GridResult<Option<String>> {
        Ok(self.contents())
    }

    fn save(&mut self, data: &str) -> GridResult<()> {
        *self.slot.borrow_mut() = Some(data.to_string());
        Ok(())
    }

    fn clear(&mut self) -> GridResult<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSaveStore::new(dir.path().join("nested").join("save.json"));

        assert_eq!(store.load().unwrap(), None);

        store.save("{\"a\":1}").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(!dir.path().join("nested").join("save.json.tmp").exists());

        store.save("second").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let mut store = FileSaveStore::new(blocker.join("save.json"));
        assert!(store.save("data").is_err());
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemorySaveStore::new();
        let mut writer = store.clone();
        writer.save("shared").unwrap();
        assert_eq!(store.contents().as_deref(), Some("shared"));

        writer.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
