use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROVIDER: &str = "TextCleaner";
const MODEL: &str = "Manual";

/// A hand-edited translation, keyed by the message text it translates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub original_text: String,
    pub translation: String,
    pub provider: String,
    pub model: String,
}

impl TranslationRecord {
    pub fn new(original_text: &str, translation: &str) -> Self {
        Self {
            original_text: original_text.to_string(),
            translation: translation.to_string(),
            provider: PROVIDER.to_string(),
            model: MODEL.to_string(),
        }
    }
}

/// Keyed storage for translations
pub trait TranslationStore {
    /// The stored translation for `original`, if any
    fn get(&self, original: &str) -> Result<Option<String>, Error>;

    /// Insert a translation for `original`, replacing the existing one
    fn put(&mut self, original: &str, translation: &str) -> Result<(), Error>;
}

/// Process-local store, mostly useful for tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, TranslationRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TranslationStore for MemoryStore {
    fn get(&self, original: &str) -> Result<Option<String>, Error> {
        Ok(self.records.get(original).map(|r| r.translation.clone()))
    }

    fn put(&mut self, original: &str, translation: &str) -> Result<(), Error> {
        self.records.insert(
            original.to_string(),
            TranslationRecord::new(original, translation),
        );
        Ok(())
    }
}

/// Store backed by a JSON array of records, rewritten on every `put`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: Vec<TranslationRecord>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file opens as an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<TranslationRecord> = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), records = records.len(), "opened translation store");
        Ok(Self { path, records })
    }

    pub fn records(&self) -> &[TranslationRecord] {
        &self.records
    }

    fn write(&self, records: &[TranslationRecord]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TranslationStore for JsonFileStore {
    fn get(&self, original: &str) -> Result<Option<String>, Error> {
        Ok(self
            .records
            .iter()
            .find(|r| r.original_text == original)
            .map(|r| r.translation.clone()))
    }

    /// Upsert and persist. The in-memory records only change once the file
    /// has been written.
    fn put(&mut self, original: &str, translation: &str) -> Result<(), Error> {
        let record = TranslationRecord::new(original, translation);
        let mut records = self.records.clone();
        match records.iter_mut().find(|r| r.original_text == original) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        self.write(&records)?;
        self.records = records;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_upserts() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("hello").unwrap(), None);

        store.put("hello", "안녕").unwrap();
        store.put("hello", "안녕하세요").unwrap();

        assert_eq!(store.get("hello").unwrap().as_deref(), Some("안녕하세요"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("translations.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.records().is_empty());
        store.put("good morning", "좋은 아침").unwrap();
        store.put("good night", "잘 자").unwrap();
        store.put("good morning", "좋은 아침이에요").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.records().len(), 2);
        assert_eq!(
            reopened.get("good morning").unwrap().as_deref(),
            Some("좋은 아침이에요")
        );
        assert_eq!(reopened.records()[0].provider, "TextCleaner");
        assert_eq!(reopened.records()[0].model, "Manual");
    }

    #[test]
    fn test_failed_write_keeps_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("translations.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(matches!(
            store.put("hello", "안녕"),
            Err(Error::IoError(_))
        ));
        assert!(store.records().is_empty());
        assert_eq!(store.get("hello").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(Error::JsonError(_))
        ));
    }
}
