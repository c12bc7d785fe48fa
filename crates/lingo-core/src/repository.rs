use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::word::{Word, WordRecord};

/// String key-value storage, the local persistence transport
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;

    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

/// In-process store, contents are lost when dropped
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Storage("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// Whole-collection persistence for a word book
pub trait WordRepository: Send + Sync {
    /// Load every word stored for `scope` (a user id)
    fn load(&self, scope: &str) -> Result<Vec<Word>, CoreError>;

    /// Replace everything stored for `scope` with `words`
    fn save(&self, scope: &str, words: &[Word]) -> Result<(), CoreError>;
}

/// Key under which a user's word book is stored
pub fn wordbook_key(user_id: &str) -> String {
    format!("wordbook_{user_id}")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WordBookDocument<'a> {
    user_id: &'a str,
    words: Vec<WordRecord>,
}

#[derive(Deserialize)]
struct StoredWordBook {
    #[serde(default)]
    words: Vec<serde_json::Value>,
}

/// [`WordRepository`] that writes one JSON document per user into a [`KeyValueStore`]
pub struct KeyValueWordRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueWordRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> WordRepository for KeyValueWordRepository<S> {
    fn load(&self, scope: &str) -> Result<Vec<Word>, CoreError> {
        let key = wordbook_key(scope);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(Vec::new());
        };

        let stored: StoredWordBook =
            serde_json::from_str(&raw).map_err(|e| CoreError::Corrupt {
                key: key.clone(),
                reason: e.to_string(),
            })?;

        let mut words = Vec::with_capacity(stored.words.len());
        for (index, value) in stored.words.into_iter().enumerate() {
            match serde_json::from_value::<WordRecord>(value) {
                Ok(record) => words.push(Word::from_record(record)),
                Err(e) => tracing::warn!("Skipping word #{index} in '{key}': {e}"),
            }
        }

        Ok(words)
    }

    fn save(&self, scope: &str, words: &[Word]) -> Result<(), CoreError> {
        let document = WordBookDocument {
            user_id: scope,
            words: words.iter().map(Word::to_record).collect(),
        };
        let json = serde_json::to_string(&document)?;
        self.store.set(&wordbook_key(scope), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn missing_wordbook_loads_empty() {
        let repo = KeyValueWordRepository::new(MemoryStore::new());
        assert!(repo.load("u1").unwrap().is_empty());
    }

    #[test]
    fn save_writes_scoped_document() {
        let store = Arc::new(MemoryStore::new());
        let repo = KeyValueWordRepository::new(store.clone());
        let word = Word::new("hello", "en").with_translation("你好");

        repo.save("u1", std::slice::from_ref(&word)).unwrap();

        let raw = store.get("wordbook_u1").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["words"][0]["text"], "hello");
        assert!(store.get("wordbook_u2").unwrap().is_none());
    }

    #[test]
    fn load_skips_unparseable_entries() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                "wordbook_u1",
                r#"{"userId":"u1","words":[
                    {"id":"w1","text":"hello","languageCode":"en","createdAt":"2024-01-01T00:00:00Z"},
                    {"id":"w2","text":42},
                    "garbage"
                ]}"#,
            )
            .unwrap();

        let words = KeyValueWordRepository::new(store).load("u1").unwrap();

        assert_eq!(words.len(), 1);
        assert_eq!(words[0].id(), "w1");
    }

    #[test]
    fn corrupt_document_is_reported() {
        let store = Arc::new(MemoryStore::new());
        store.set("wordbook_u1", "{not json").unwrap();

        let err = KeyValueWordRepository::new(store).load("u1").unwrap_err();
        assert!(matches!(err, CoreError::Corrupt { .. }));
    }
}
