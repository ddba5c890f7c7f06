//! Named-slot storage backends.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// A durable key-value medium holding serialized grids under named slots.
pub trait SlotStorage {
    /// Text stored under `name`, or None if the slot was never written.
    fn read_slot(&self, name: &str) -> io::Result<Option<String>>;

    fn write_slot(&mut self, name: &str, text: &str) -> io::Result<()>;
}

/// One `<slot>.json` file per slot inside a directory.
#[derive(Clone, Debug)]
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl SlotStorage for DirStorage {
    fn read_slot(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(name)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes a sibling temp file first and renames it over the slot, so a
    /// crash mid-write leaves the previous state intact.
    fn write_slot(&mut self, name: &str, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(name);
        let tmp = self.dir.join(format!(".{name}.json.tmp"));
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &path)
    }
}

/// In-process slots. Clones share the same slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current text of a slot.
    pub fn get(&self, name: &str) -> Option<String> {
        self.slots().get(name).cloned()
    }

    /// Seed a slot directly, e.g. with state saved elsewhere.
    pub fn insert(&self, name: &str, text: &str) {
        self.slots().insert(name.to_string(), text.to_string());
    }
}

impl SlotStorage for MemoryStorage {
    fn read_slot(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.get(name))
    }

    fn write_slot(&mut self, name: &str, text: &str) -> io::Result<()> {
        self.insert(name, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(dir.path().join("nested"));
        assert_eq!(storage.read_slot("spreadsheet").unwrap(), None);

        storage.write_slot("spreadsheet", "{}").unwrap();
        assert_eq!(storage.read_slot("spreadsheet").unwrap().as_deref(), Some("{}"));
        assert!(storage.slot_path("spreadsheet").exists());

        storage.write_slot("spreadsheet", "{\"0-0\":1}").unwrap();
        assert_eq!(
            storage.read_slot("spreadsheet").unwrap().as_deref(),
            Some("{\"0-0\":1}")
        );
    }

    #[test]
    fn test_dir_storage_slots_are_separate() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = DirStorage::new(dir.path());
        storage.write_slot("a", "1").unwrap();
        storage.write_slot("b", "2").unwrap();
        assert_eq!(storage.read_slot("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.read_slot("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_memory_storage_clones_share_slots() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.write_slot("spreadsheet", "{}").unwrap();
        assert_eq!(storage.get("spreadsheet").as_deref(), Some("{}"));
        assert_eq!(storage.read_slot("other").unwrap(), None);
    }
}
