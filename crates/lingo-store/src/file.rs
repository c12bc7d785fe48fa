use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use lingo_core::{CoreError, KeyValueStore};

/// Key-value store keeping one `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!("Using data directory {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_name(key)))
    }
}

/// Percent-encode every byte outside `[A-Za-z0-9_-]`, so distinct keys never share a file
fn file_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_') {
            name.push(byte as char);
        } else {
            name.push_str(&format!("%{byte:02X}"));
        }
    }
    name
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lingo_core::{KeyValueWordRepository, Word, WordBook};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("user").unwrap(), None);
        store.remove("user").unwrap();
    }

    #[test]
    fn set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();

        store.set("user", r#"{"id": "u1"}"#).unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some(r#"{"id": "u1"}"#));
        assert!(dir.path().join("nested").join("user.json").exists());

        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn keys_cannot_escape_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("../evil/key", "x").unwrap();
        assert!(store.path_for("../evil/key").starts_with(dir.path()));
        assert_eq!(store.get("../evil/key").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn similar_keys_use_distinct_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set("a.b", "dot").unwrap();
        store.set("a_b", "underscore").unwrap();
        store.set("a/b", "slash").unwrap();

        assert_eq!(store.get("a.b").unwrap().as_deref(), Some("dot"));
        assert_eq!(store.get("a_b").unwrap().as_deref(), Some("underscore"));
        assert_eq!(store.get("a/b").unwrap().as_deref(), Some("slash"));
        assert!(dir.path().join("a_b.json").exists());
        assert!(dir.path().join("a%2Eb.json").exists());
    }

    #[test]
    fn wordbook_survives_reopening() {
        let dir = TempDir::new().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            let repository = Arc::new(KeyValueWordRepository::new(store));
            let mut book = WordBook::new("u1", repository);
            book.add_word(Word::new("hello", "en").with_translation("你好"))
                .unwrap();
            book.add_word(Word::new("world", "en").with_translation("世界"))
                .unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        let book = WordBook::load("u1", Arc::new(KeyValueWordRepository::new(store)));

        let mut texts: Vec<_> = book.all_words().iter().map(|w| w.text().to_string()).collect();
        texts.sort();
        assert_eq!(texts, vec!["hello", "world"]);
        assert!(dir.path().join("wordbook_u1.json").exists());
    }

    #[test]
    fn corrupt_file_loads_as_empty_book() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("wordbook_u1.json"), "{not json").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        let book = WordBook::load("u1", Arc::new(KeyValueWordRepository::new(store)));

        assert_eq!(book.total_word_count(), 0);
    }
}
