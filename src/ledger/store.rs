use std::path::{Path, PathBuf};
use parking_lot::Mutex;
use crate::error::QuizError;
use crate::ledger::model::MistakeLedger;

/// Persistence seam for the mistake ledger.
/// Reads never fail: unreadable or corrupt data is an empty ledger.
pub trait MistakeStore {
    fn get(&self) -> MistakeLedger;
    fn set(&self, ledger: &MistakeLedger) -> Result<(), QuizError>;
    fn clear(&self) -> Result<(), QuizError>;
}

/// Ledger persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MistakeStore for JsonFileStore {
    fn get(&self) -> MistakeLedger {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => match serde_json::from_str::<MistakeLedger>(&data) {
                Ok(ledger) => ledger,
                Err(e) => {
                    tracing::warn!(
                        path = ?self.path,
                        error = %e,
                        "Failed to parse mistake ledger, treating as empty"
                    );
                    MistakeLedger::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MistakeLedger::new(),
            Err(e) => {
                tracing::warn!(
                    path = ?self.path,
                    error = %e,
                    "Failed to read mistake ledger, treating as empty"
                );
                MistakeLedger::new()
            }
        }
    }

    fn set(&self, ledger: &MistakeLedger) -> Result<(), QuizError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(ledger)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), QuizError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process ledger, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: Mutex<MistakeLedger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: MistakeLedger) -> Self {
        MemoryStore { ledger: Mutex::new(ledger) }
    }
}

impl MistakeStore for MemoryStore {
    fn get(&self) -> MistakeLedger {
        self.ledger.lock().clone()
    }

    fn set(&self, ledger: &MistakeLedger) -> Result<(), QuizError> {
        *self.ledger.lock() = ledger.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), QuizError> {
        *self.ledger.lock() = MistakeLedger::new();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("ledger.json"));
        assert!(store.get().is_empty());

        let mut ledger = MistakeLedger::new();
        ledger.increment("猫");
        store.set(&ledger).unwrap();
        assert_eq!(store.get().count("猫"), 1);

        store.clear().unwrap();
        assert!(store.get().is_empty());
        store.clear().unwrap();
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{ this is not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.get().is_empty());

        // A wrong shape is corrupt too
        std::fs::write(&path, r#"{"猫": "many"}"#).unwrap();
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        let mut ledger = store.get();
        ledger.increment("犬");
        store.set(&ledger).unwrap();
        assert_eq!(store.get().count("犬"), 1);
        store.clear().unwrap();
        assert!(store.get().is_empty());
    }
}
