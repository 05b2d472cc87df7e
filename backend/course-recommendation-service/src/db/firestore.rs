//! Cloud Firestore REST adapter.
//!
//! Lists every document of a collection through
//! `GET /v1/projects/{project}/databases/{database}/documents/{collection}`,
//! following `nextPageToken` until the collection is exhausted. Firestore wraps
//! each field in a typed value (`{"stringValue": "..."}`), decoded here by
//! [`FirestoreValue`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use super::{CatalogStore, InteractionStore, StoreError};
use crate::config::{CollectionsConfig, FirestoreConfig};
use crate::models::{Course, SearchEvent, ViewEvent};

/// A Firestore typed value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirestoreValue {
    NullValue(()),
    BooleanValue(bool),
    /// int64 travels as a decimal string
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<FirestoreValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, FirestoreValue>,
}

impl FirestoreValue {
    /// Plain JSON rendering, used for course documents returned by search.
    pub fn to_json(&self) -> Value {
        match self {
            FirestoreValue::NullValue(()) => Value::Null,
            FirestoreValue::BooleanValue(b) => Value::Bool(*b),
            FirestoreValue::IntegerValue(raw) => raw
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| Value::String(raw.clone())),
            FirestoreValue::DoubleValue(d) => Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FirestoreValue::TimestampValue(s)
            | FirestoreValue::StringValue(s)
            | FirestoreValue::BytesValue(s)
            | FirestoreValue::ReferenceValue(s) => Value::String(s.clone()),
            FirestoreValue::GeoPointValue(p) => serde_json::json!({
                "latitude": p.latitude,
                "longitude": p.longitude,
            }),
            FirestoreValue::ArrayValue(a) => {
                Value::Array(a.values.iter().map(FirestoreValue::to_json).collect())
            }
            FirestoreValue::MapValue(m) => Value::Object(fields_to_json(&m.fields)),
        }
    }
}

fn fields_to_json(fields: &BTreeMap<String, FirestoreValue>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, FirestoreValue>,
}

impl Document {
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Firestore-backed [`InteractionStore`] and [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    documents_url: String,
    access_token: Option<String>,
    page_size: u32,
    collections: CollectionsConfig,
}

impl FirestoreStore {
    pub fn new(
        config: &FirestoreConfig,
        collections: CollectionsConfig,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let documents_url = format!(
            "{}/projects/{}/databases/{}/documents",
            config.base_url(),
            config.project_id,
            config.database
        );

        // The emulator accepts unauthenticated requests.
        let access_token = match config.emulator_host {
            Some(_) => None,
            None => config.access_token.clone(),
        };

        Ok(Self {
            client,
            documents_url,
            access_token,
            page_size: config.page_size.max(1),
            collections,
        })
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}/{}", self.documents_url, collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&url)
                .query(&[("pageSize", self.page_size.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }
            if let Some(access_token) = &self.access_token {
                request = request.bearer_auth(access_token);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::Status {
                    collection: collection.to_string(),
                    status: status.as_u16(),
                    body,
                });
            }

            let page: ListDocumentsResponse =
                response.json().await.map_err(|e| StoreError::Malformed {
                    collection: collection.to_string(),
                    reason: e.to_string(),
                })?;

            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(
            collection = collection,
            count = documents.len(),
            "Fetched Firestore collection"
        );

        Ok(documents)
    }
}

#[async_trait]
impl InteractionStore for FirestoreStore {
    async fn fetch_search_events(&self) -> Result<Vec<SearchEvent>, StoreError> {
        let collection = &self.collections.searches;
        self.list_documents(collection)
            .await?
            .iter()
            .map(|doc| -> Result<SearchEvent, StoreError> {
                Ok(SearchEvent {
                    user_id: string_field(doc, collection, "userId")?,
                    query: string_field(doc, collection, "query")?,
                    timestamp: timestamp_field(doc, "timestamp"),
                })
            })
            .collect()
    }

    async fn fetch_view_events(&self) -> Result<Vec<ViewEvent>, StoreError> {
        let collection = &self.collections.views;
        self.list_documents(collection)
            .await?
            .iter()
            .map(|doc| -> Result<ViewEvent, StoreError> {
                Ok(ViewEvent {
                    user_id: string_field(doc, collection, "userId")?,
                    course_id: string_field(doc, collection, "courseId")?,
                    timestamp: timestamp_field(doc, "timestamp"),
                })
            })
            .collect()
    }
}

#[async_trait]
impl CatalogStore for FirestoreStore {
    async fn fetch_courses(&self) -> Result<Vec<Course>, StoreError> {
        let collection = &self.collections.courses;
        self.list_documents(collection)
            .await?
            .iter()
            .map(|doc| -> Result<Course, StoreError> {
                let title = string_field(doc, collection, "title")?;
                let description = string_field(doc, collection, "description")?;
                let mut extra = fields_to_json(&doc.fields);
                extra.remove("title");
                extra.remove("description");

                Ok(Course {
                    id: doc.id().to_string(),
                    title,
                    description,
                    extra,
                })
            })
            .collect()
    }
}

/// Missing and null fields read as empty; any other non-string type is malformed.
fn string_field(doc: &Document, collection: &str, field: &str) -> Result<String, StoreError> {
    match doc.fields.get(field) {
        None | Some(FirestoreValue::NullValue(())) => Ok(String::new()),
        Some(FirestoreValue::StringValue(s)) => Ok(s.clone()),
        Some(other) => Err(StoreError::Malformed {
            collection: collection.to_string(),
            reason: format!(
                "document {} field '{}' is not a string: {:?}",
                doc.id(),
                field,
                other
            ),
        }),
    }
}

/// Timestamps are informational only, so unparseable values become `None`.
fn timestamp_field(doc: &Document, field: &str) -> Option<DateTime<Utc>> {
    match doc.fields.get(field)? {
        FirestoreValue::TimestampValue(s) | FirestoreValue::StringValue(s) => {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        FirestoreValue::IntegerValue(raw) => raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_typed_values() {
        let raw = serde_json::json!({
            "name": "projects/p/databases/(default)/documents/courses/rust-101",
            "fields": {
                "title": {"stringValue": "Rust 101"},
                "seats": {"integerValue": "42"},
                "rating": {"doubleValue": 4.5},
                "published": {"booleanValue": true},
                "tags": {"arrayValue": {"values": [{"stringValue": "systems"}]}},
                "meta": {"mapValue": {"fields": {"level": {"stringValue": "beginner"}}}},
                "archived": {"nullValue": null}
            }
        });
        let doc: Document = serde_json::from_value(raw).unwrap();

        assert_eq!(doc.id(), "rust-101");
        let json = fields_to_json(&doc.fields);
        assert_eq!(json["title"], "Rust 101");
        assert_eq!(json["seats"], 42);
        assert_eq!(json["rating"], 4.5);
        assert_eq!(json["published"], true);
        assert_eq!(json["tags"], serde_json::json!(["systems"]));
        assert_eq!(json["meta"], serde_json::json!({"level": "beginner"}));
        assert!(json["archived"].is_null());
    }

    #[test]
    fn test_empty_map_and_array_values() {
        let value: FirestoreValue =
            serde_json::from_value(serde_json::json!({"mapValue": {}})).unwrap();
        assert_eq!(value.to_json(), serde_json::json!({}));

        let value: FirestoreValue =
            serde_json::from_value(serde_json::json!({"arrayValue": {}})).unwrap();
        assert_eq!(value.to_json(), serde_json::json!([]));
    }

    #[test]
    fn test_string_field_rules() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "name": "projects/p/databases/(default)/documents/user_searches/s1",
            "fields": {
                "userId": {"integerValue": "7"},
                "query": {"nullValue": null}
            }
        }))
        .unwrap();

        assert_eq!(string_field(&doc, "user_searches", "query").unwrap(), "");
        assert_eq!(string_field(&doc, "user_searches", "missing").unwrap(), "");
        let err = string_field(&doc, "user_searches", "userId").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_timestamp_field_variants() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "name": "projects/p/databases/(default)/documents/user_searches/s1",
            "fields": {
                "a": {"timestampValue": "2024-05-01T12:30:00.123456Z"},
                "b": {"integerValue": "1714566600000"},
                "c": {"booleanValue": false},
                "d": {"stringValue": "yesterday"}
            }
        }))
        .unwrap();

        assert!(timestamp_field(&doc, "a").is_some());
        assert_eq!(
            timestamp_field(&doc, "b").unwrap().timestamp_millis(),
            1_714_566_600_000
        );
        assert!(timestamp_field(&doc, "c").is_none());
        assert!(timestamp_field(&doc, "d").is_none());
        assert!(timestamp_field(&doc, "missing").is_none());
    }
}
