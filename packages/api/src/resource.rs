//! # Entity CRUD: one generic code path for properties, vendors and upsells
//!
//! Each managed entity implements [`Resource`], naming its REST collection.
//! The [`ApiClient`] methods below then give every entity the same five
//! operations:
//!
//! | Method | Request |
//! |--------|---------|
//! | [`ApiClient::list`] | `GET /{path}` |
//! | [`ApiClient::fetch`] | `GET /{path}/{id}` |
//! | [`ApiClient::create`] | `POST /{path}` |
//! | [`ApiClient::update`] | `PUT /{path}/{id}` |
//! | [`ApiClient::remove`] | `DELETE /{path}/{id}` |
//!
//! Cache keys follow the same naming: [`Resource::collection_key`] is the path
//! and [`Resource::entity_key`] is `{path}/{id}`. After any successful write
//! call [`invalidate_after_write`] so the list and the edited record refetch.

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{Property, QueryCache, Upsell, Vendor};

use crate::client::ApiClient;
use crate::error::Result;
use crate::transport::Transport;

pub trait Resource: Serialize + DeserializeOwned + Clone + PartialEq + 'static {
    /// Collection path without the leading slash, e.g. `"properties"`.
    const PATH: &'static str;
    /// Singular noun for notifications.
    const NOUN: &'static str;

    fn id(&self) -> i64;
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    fn collection_key() -> String {
        QueryCache::key(Self::PATH, None)
    }

    fn entity_key(id: i64) -> String {
        QueryCache::key(Self::PATH, Some(id))
    }
}

impl Resource for Property {
    const PATH: &'static str = "properties";
    const NOUN: &'static str = "Property";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Resource for Vendor {
    const PATH: &'static str = "vendors";
    const NOUN: &'static str = "Vendor";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

impl Resource for Upsell {
    const PATH: &'static str = "upsells";
    const NOUN: &'static str = "Upsell";

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// Drop cached data a write to `R` may have changed.
///
/// Upsells embed property and vendor names and orders embed all three, so
/// writes to properties or vendors also invalidate those collections.
pub fn invalidate_after_write<R: Resource>(cache: &QueryCache, id: Option<i64>) {
    cache.invalidate(&R::collection_key());
    if let Some(id) = id {
        cache.invalidate(&R::entity_key(id));
    }
    if R::PATH != Upsell::PATH {
        cache.invalidate(&Upsell::collection_key());
    }
    cache.invalidate("orders");
    cache.invalidate("dashboard/stats");
}

fn collection_path<R: Resource>() -> String {
    format!("/{}", R::PATH)
}

fn entity_path<R: Resource>(id: i64) -> String {
    format!("/{}/{id}", R::PATH)
}

impl<T: Transport> ApiClient<T> {
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        self.get(&collection_path::<R>()).await
    }

    pub async fn fetch<R: Resource>(&self, id: i64) -> Result<R> {
        self.get(&entity_path::<R>(id)).await
    }

    /// Create a record; every call creates a new one, with no deduplication.
    pub async fn create<R: Resource, P: Serialize>(&self, payload: &P) -> Result<R> {
        let created: R = self.post(&collection_path::<R>(), payload).await?;
        tracing::info!("created {} {}", R::NOUN, created.id());
        Ok(created)
    }

    pub async fn update<R: Resource, P: Serialize>(&self, id: i64, payload: &P) -> Result<R> {
        let updated: R = self.put(&entity_path::<R>(id), payload).await?;
        tracing::info!("updated {} {id}", R::NOUN);
        Ok(updated)
    }

    /// POST when `id` is `None`, PUT otherwise.
    pub async fn save<R: Resource, P: Serialize>(&self, id: Option<i64>, payload: &P) -> Result<R> {
        match id {
            Some(id) => self.update(id, payload).await,
            None => self.create(payload).await,
        }
    }

    pub async fn remove<R: Resource>(&self, id: i64) -> Result<()> {
        self.delete(&entity_path::<R>(id)).await?;
        tracing::info!("deleted {} {id}", R::NOUN);
        Ok(())
    }

    /// Flip `is_active` and persist the whole record.
    pub async fn toggle_active<R: Resource>(&self, item: &R) -> Result<R> {
        let mut next = item.clone();
        next.set_active(!item.is_active());
        self.update(item.id(), &next).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::mock::{json_response, property_json, MockTransport};
    use crate::transport::Method;
    use serde_json::{json, Value};

    /// A tiny in-memory `/properties` backend that assigns ids on POST.
    fn property_backend() -> MockTransport {
        let rows: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        MockTransport::new(move |req| {
            let mut rows = rows.lock().unwrap();
            match (req.method, req.path.as_str()) {
                (Method::Get, "/properties") => json_response(200, json!({"data": *rows})),
                (Method::Post, "/properties") => {
                    let body = req.json().unwrap();
                    let id = rows.len() as i64 + 1;
                    let row = property_json(id, body["name"].as_str().unwrap());
                    rows.push(row.clone());
                    json_response(201, row)
                }
                (Method::Get, path) => {
                    let id: i64 = path.trim_start_matches("/properties/").parse().unwrap();
                    match rows.iter().find(|r| r["id"] == id) {
                        Some(row) => json_response(200, row.clone()),
                        None => json_response(404, json!({"message": "Not found"})),
                    }
                }
                _ => json_response(405, json!({})),
            }
        })
    }

    #[tokio::test]
    async fn test_create_then_fetch_returns_new_record() {
        let client = ApiClient::with_transport(property_backend());
        let created: Property = client.create(&json!({"name": "Villa Sari"})).await.unwrap();
        let fetched: Property = client.fetch(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Villa Sari");
    }

    #[tokio::test]
    async fn test_identical_creates_make_two_records() {
        let client = ApiClient::with_transport(property_backend());
        let payload = json!({"name": "Villa Sari"});
        let a: Property = client.create(&payload).await.unwrap();
        let b: Property = client.create(&payload).await.unwrap();
        assert_ne!(a.id, b.id);
        let all: Vec<Property> = client.list().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_save_picks_method_by_id() {
        let mock = MockTransport::new(|_| json_response(200, property_json(7, "Villa")));
        let client = ApiClient::with_transport(mock.clone());

        let _: Property = client.save(None, &json!({"name": "Villa"})).await.unwrap();
        let _: Property = client.save(Some(7), &json!({"name": "Villa"})).await.unwrap();

        let requests = mock.requests();
        assert_eq!((requests[0].method, requests[0].path.as_str()), (Method::Post, "/properties"));
        assert_eq!((requests[1].method, requests[1].path.as_str()), (Method::Put, "/properties/7"));
    }

    #[tokio::test]
    async fn test_toggle_active_sends_flipped_flag() {
        let mock = MockTransport::new(|req| json_response(200, req.json().unwrap().clone()));
        let client = ApiClient::with_transport(mock.clone());
        let vendor: Vendor = serde_json::from_value(json!({
            "id": 3, "name": "Bali Chef", "service_type": "chef", "is_active": true
        }))
        .unwrap();

        let updated = client.toggle_active(&vendor).await.unwrap();
        assert!(!updated.is_active);
        assert_eq!(mock.last().path, "/vendors/3");
    }

    #[tokio::test]
    async fn test_delete_hits_entity_path() {
        let mock = MockTransport::new(|_| json_response(204, Value::Null));
        let client = ApiClient::with_transport(mock.clone());
        client.remove::<Upsell>(12).await.unwrap();
        let req = mock.last();
        assert_eq!((req.method, req.path.as_str()), (Method::Delete, "/upsells/12"));
    }

    #[test]
    fn test_invalidate_after_write_drops_related_collections() {
        let cache = QueryCache::new();
        cache.put(&Property::collection_key(), &Vec::<Property>::new());
        cache.put(&Property::entity_key(4), &json!({}));
        cache.put(&Upsell::collection_key(), &Vec::<Upsell>::new());
        cache.put("orders?status=pending", &json!([]));
        cache.put(&Vendor::collection_key(), &Vec::<Vendor>::new());

        invalidate_after_write::<Property>(&cache, Some(4));

        assert!(!cache.contains("properties"));
        assert!(!cache.contains("properties/4"));
        assert!(!cache.contains("upsells"));
        assert!(!cache.contains("orders?status=pending"));
        assert!(cache.contains("vendors"));
    }
}
