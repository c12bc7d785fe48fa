use std::sync::Arc;

use lingo_core::{HistoryEntry, User, UserRecord, WordBookEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::document::{Collection, DocumentStore, Stored};
use crate::error::StoreError;

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Malformed(format!("expected an object, got {other}"))),
    }
}

/// Decode a listing, skipping documents that do not fit `T`
fn decode_all<T: DeserializeOwned>(
    documents: Vec<Stored<Value>>,
    collection: Collection,
) -> Vec<Stored<T>> {
    documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value(doc.data) {
            Ok(data) => Some(Stored { id: doc.id, data }),
            Err(e) => {
                tracing::warn!("Skipping {} document {}: {}", collection, doc.id, e);
                None
            }
        })
        .collect()
}

/// Profiles, word book entries and practice history of account users
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn DocumentStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let Some(data) = self.store.get_profile(user_id).await? else {
            return Ok(None);
        };
        let record: UserRecord = serde_json::from_value(data)
            .map_err(|e| StoreError::Malformed(format!("users/{user_id}: {e}")))?;
        Ok(Some(User::from_record(record)))
    }

    pub async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let data = serde_json::to_value(user.to_record())?;
        self.store.set_profile(user.id(), data).await?;
        tracing::info!("Created profile {}", user.id());
        Ok(())
    }

    /// Write every profile field of an existing user
    pub async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        let fields = to_object(&user.to_record())?;
        self.store.update_profile(user.id(), fields).await
    }

    pub async fn add_word_to_book(
        &self,
        user_id: &str,
        entry: &WordBookEntry,
    ) -> Result<String, StoreError> {
        let data = serde_json::to_value(entry)?;
        self.store.add(user_id, Collection::WordBook, data).await
    }

    /// Newest first
    pub async fn get_word_book(
        &self,
        user_id: &str,
    ) -> Result<Vec<Stored<WordBookEntry>>, StoreError> {
        let documents = self.store.list(user_id, Collection::WordBook).await?;
        Ok(decode_all(documents, Collection::WordBook))
    }

    pub async fn delete_word_from_word_book(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<(), StoreError> {
        self.store.delete(user_id, Collection::WordBook, entry_id).await
    }

    pub async fn add_history(
        &self,
        user_id: &str,
        entry: &HistoryEntry,
    ) -> Result<String, StoreError> {
        let data = serde_json::to_value(entry)?;
        self.store.add(user_id, Collection::History, data).await
    }

    /// Newest first
    pub async fn get_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<Stored<HistoryEntry>>, StoreError> {
        let documents = self.store.list(user_id, Collection::History).await?;
        Ok(decode_all(documents, Collection::History))
    }

    pub async fn delete_history_item(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<(), StoreError> {
        self.store.delete(user_id, Collection::History, entry_id).await
    }
}
