use async_trait::async_trait;
use lingo_config::firebase::FirebaseConfig;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::document::{CREATED_AT, Collection, DocumentStore, Stored};
use crate::error::StoreError;

const USERS: &str = "users";
const PAGE_SIZE: &str = "300";

/// Plain JSON into a Firestore typed value; `createdAt` strings become timestamps
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(values) => json!({
            "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn encode_fields(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| {
            let encoded = match value {
                Value::String(s) if key == CREATED_AT => json!({ "timestampValue": s }),
                other => encode_value(other),
            };
            (key.clone(), encoded)
        })
        .collect()
}

fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Malformed(format!("untyped value {value}")));
    };

    Ok(match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or_default()),
        "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
        "integerValue" => {
            let n: i64 = inner
                .as_str()
                .and_then(|s| s.parse().ok())
                .or_else(|| inner.as_i64())
                .ok_or_else(|| StoreError::Malformed(format!("bad integerValue {inner}")))?;
            Value::from(n)
        }
        "doubleValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner["values"]
                .as_array()
                .map(|values| values.iter().map(decode_value).collect::<Result<_, _>>())
                .transpose()?
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(decode_fields(&inner["fields"])?),
        other => return Err(StoreError::Malformed(format!("unsupported value type {other}"))),
    })
}

fn decode_fields(fields: &Value) -> Result<Map<String, Value>, StoreError> {
    let Some(fields) = fields.as_object() else {
        return Ok(Map::new());
    };
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

#[derive(Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Value,
}

impl Document {
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Cloud Firestore REST client acting on behalf of one signed-in user
#[derive(Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    documents_url: String,
    id_token: String,
}

impl FirestoreStore {
    pub fn new(config: &FirebaseConfig, id_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            documents_url: config.documents_url(),
            id_token,
        }
    }

    fn profile_url(&self, user_id: &str) -> String {
        format!("{}/{USERS}/{user_id}", self.documents_url)
    }

    fn collection_url(&self, user_id: &str, collection: Collection) -> String {
        format!("{}/{collection}", self.profile_url(user_id))
    }

    fn body(data: &Value) -> Result<Value, StoreError> {
        let fields = data
            .as_object()
            .ok_or_else(|| StoreError::Malformed("document data must be an object".to_string()))?;
        Ok(json!({ "fields": encode_fields(fields) }))
    }

    /// Map non-success statuses to errors, 404 included
    async fn check(
        response: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == 404 {
            return Err(StoreError::NotFound(path.to_string()));
        }

        let json: Value = response.json().await.unwrap_or_default();
        let message = json["error"]["message"]
            .as_str()
            .unwrap_or("request failed")
            .to_string();
        tracing::error!("Firestore {} failed with HTTP {}: {}", path, status, message);
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.profile_url(user_id))
            .bearer_auth(&self.id_token)
            .send()
            .await?;

        let document: Document = match Self::check(response, &format!("{USERS}/{user_id}")).await {
            Ok(response) => response.json().await?,
            Err(StoreError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(Value::Object(decode_fields(&document.fields)?)))
    }

    async fn set_profile(&self, user_id: &str, data: Value) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.profile_url(user_id))
            .bearer_auth(&self.id_token)
            .json(&Self::body(&data)?)
            .send()
            .await?;

        Self::check(response, &format!("{USERS}/{user_id}")).await?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut query: Vec<(&str, &str)> = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", key.as_str()))
            .collect();
        query.push(("currentDocument.exists", "true"));

        let data = Value::Object(fields.clone());
        let response = self
            .client
            .patch(self.profile_url(user_id))
            .bearer_auth(&self.id_token)
            .query(&query)
            .json(&Self::body(&data)?)
            .send()
            .await?;

        Self::check(response, &format!("{USERS}/{user_id}")).await?;
        Ok(())
    }

    async fn delete_profile(&self, user_id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.profile_url(user_id))
            .bearer_auth(&self.id_token)
            .send()
            .await?;

        Self::check(response, &format!("{USERS}/{user_id}")).await?;
        Ok(())
    }

    async fn add(
        &self,
        user_id: &str,
        collection: Collection,
        data: Value,
    ) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.collection_url(user_id, collection))
            .bearer_auth(&self.id_token)
            .json(&Self::body(&data)?)
            .send()
            .await?;

        let document: Document = Self::check(response, &format!("{USERS}/{user_id}/{collection}"))
            .await?
            .json()
            .await?;

        tracing::debug!("Added {} document {}", collection, document.id());
        Ok(document.id().to_string())
    }

    async fn list(
        &self,
        user_id: &str,
        collection: Collection,
    ) -> Result<Vec<Stored<Value>>, StoreError> {
        let path = format!("{USERS}/{user_id}/{collection}");
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("orderBy", format!("{CREATED_AT} desc")),
                ("pageSize", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let response = self
                .client
                .get(self.collection_url(user_id, collection))
                .bearer_auth(&self.id_token)
                .query(&query)
                .send()
                .await?;

            let page: ListResponse = Self::check(response, &path).await?.json().await?;
            for document in page.documents {
                match decode_fields(&document.fields) {
                    Ok(fields) => documents.push(Stored {
                        id: document.id().to_string(),
                        data: Value::Object(fields),
                    }),
                    Err(e) => {
                        tracing::warn!("Skipping {} document {}: {}", collection, document.id(), e)
                    }
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(documents)
    }

    async fn delete(
        &self,
        user_id: &str,
        collection: Collection,
        id: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(format!("{}/{id}", self.collection_url(user_id, collection)))
            .bearer_auth(&self.id_token)
            .send()
            .await?;

        Self::check(response, &format!("{USERS}/{user_id}/{collection}/{id}")).await?;
        Ok(())
    }
}
