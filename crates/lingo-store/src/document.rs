use std::cmp::Reverse;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lingo_core::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;

/// Field every sub-collection document carries, used for ordering
pub const CREATED_AT: &str = "createdAt";

/// Per-user sub-collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    WordBook,
    History,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::WordBook => "wordbook",
            Collection::History => "history",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document together with the id the store assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    pub data: T,
}

/// User document tree: `users/{id}` plus its `wordbook` and `history` sub-collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, StoreError>;

    /// Create or replace the profile document
    async fn set_profile(&self, user_id: &str, data: Value) -> Result<(), StoreError>;

    /// Merge `fields` into an existing profile; `NotFound` if there is none
    async fn update_profile(
        &self,
        user_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;

    async fn delete_profile(&self, user_id: &str) -> Result<(), StoreError>;

    /// Append a document, returning its generated id
    async fn add(
        &self,
        user_id: &str,
        collection: Collection,
        data: Value,
    ) -> Result<String, StoreError>;

    /// Every document in the collection, newest `createdAt` first
    async fn list(
        &self,
        user_id: &str,
        collection: Collection,
    ) -> Result<Vec<Stored<Value>>, StoreError>;

    async fn delete(
        &self,
        user_id: &str,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError>;
}

fn created_at(data: &Value) -> Option<DateTime<Utc>> {
    data.get(CREATED_AT)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Newest first; documents without a readable `createdAt` go last
pub fn sort_newest_first(documents: &mut [Stored<Value>]) {
    documents.sort_by_key(|doc| Reverse(created_at(&doc.data)));
}

/// [`DocumentStore`] over a local [`KeyValueStore`], used when no account backend is configured
pub struct KeyValueDocumentStore<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueDocumentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn profile_key(user_id: &str) -> String {
        format!("profile_{user_id}")
    }

    /// Kept apart from the local word book's `wordbook_{user}` key
    fn collection_key(user_id: &str, collection: Collection) -> String {
        format!("docs_{collection}_{user_id}")
    }

    fn read_collection(&self, key: &str) -> Result<Vec<Stored<Value>>, StoreError> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::Malformed(format!("{key}: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection(&self, key: &str, documents: &[Stored<Value>]) -> Result<(), StoreError> {
        let json = serde_json::to_string(documents)?;
        self.store.set(key, &json)?;
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore> DocumentStore for KeyValueDocumentStore<S> {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, StoreError> {
        let key = Self::profile_key(user_id);
        match self.store.get(&key)? {
            Some(raw) => Ok(Some(
                serde_json::from_str(&raw)
                    .map_err(|e| StoreError::Malformed(format!("{key}: {e}")))?,
            )),
            None => Ok(None),
        }
    }

    async fn set_profile(&self, user_id: &str, data: Value) -> Result<(), StoreError> {
        self.store
            .set(&Self::profile_key(user_id), &serde_json::to_string(&data)?)?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let Some(mut profile) = self.get_profile(user_id).await? else {
            return Err(StoreError::NotFound(format!("users/{user_id}")));
        };
        let Some(object) = profile.as_object_mut() else {
            return Err(StoreError::Malformed(format!("users/{user_id} is not an object")));
        };
        object.extend(fields);
        self.set_profile(user_id, profile).await
    }

    async fn delete_profile(&self, user_id: &str) -> Result<(), StoreError> {
        self.store.remove(&Self::profile_key(user_id))?;
        Ok(())
    }

    async fn add(
        &self,
        user_id: &str,
        collection: Collection,
        data: Value,
    ) -> Result<String, StoreError> {
        let key = Self::collection_key(user_id, collection);
        let mut documents = self.read_collection(&key)?;
        let id = Uuid::new_v4().simple().to_string();
        documents.push(Stored {
            id: id.clone(),
            data,
        });
        self.write_collection(&key, &documents)?;
        Ok(id)
    }

    async fn list(
        &self,
        user_id: &str,
        collection: Collection,
    ) -> Result<Vec<Stored<Value>>, StoreError> {
        let mut documents = self.read_collection(&Self::collection_key(user_id, collection))?;
        sort_newest_first(&mut documents);
        Ok(documents)
    }

    async fn delete(
        &self,
        user_id: &str,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError> {
        let key = Self::collection_key(user_id, collection);
        let mut documents = self.read_collection(&key)?;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() != before {
            self.write_collection(&key, &documents)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lingo_core::MemoryStore;
    use serde_json::json;

    use super::*;

    fn store() -> KeyValueDocumentStore<MemoryStore> {
        KeyValueDocumentStore::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn update_merges_into_existing_profile() {
        let store = store();
        store
            .set_profile("u1", json!({"id": "u1", "name": "Ana", "teachingLanguage": "zh"}))
            .await
            .unwrap();

        let mut fields = Map::new();
        fields.insert("name".into(), json!("Ben"));
        store.update_profile("u1", fields).await.unwrap();

        let profile = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile["name"], "Ben");
        assert_eq!(profile["teachingLanguage"], "zh");
    }

    #[tokio::test]
    async fn update_of_missing_profile_is_not_found() {
        let result = store().update_profile("ghost", Map::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_scoped() {
        let store = store();
        store
            .add(
                "u1",
                Collection::History,
                json!({"question": "old", "createdAt": "2024-01-01T00:00:00Z"}),
            )
            .await
            .unwrap();
        store
            .add(
                "u1",
                Collection::History,
                json!({"question": "new", "createdAt": "2024-03-01T00:00:00.5Z"}),
            )
            .await
            .unwrap();
        store
            .add("u1", Collection::History, json!({"question": "undated"}))
            .await
            .unwrap();
        store
            .add(
                "u2",
                Collection::History,
                json!({"question": "other", "createdAt": "2025-01-01T00:00:00Z"}),
            )
            .await
            .unwrap();

        let questions: Vec<_> = store
            .list("u1", Collection::History)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.data["question"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(questions, vec!["new", "old", "undated"]);
        assert!(store.list("u1", Collection::WordBook).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_matching_id() {
        let store = store();
        let keep = store.add("u1", Collection::WordBook, json!({"word": "a"})).await.unwrap();
        let drop = store.add("u1", Collection::WordBook, json!({"word": "b"})).await.unwrap();

        store.delete("u1", Collection::WordBook, &drop).await.unwrap();
        store.delete("u1", Collection::WordBook, "missing").await.unwrap();

        let ids: Vec<_> = store
            .list("u1", Collection::WordBook)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.id)
            .collect();
        assert_eq!(ids, vec![keep]);
    }
}
