//! Recording transport for tests.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::error::Result;
use crate::transport::{ApiRequest, ApiResponse, Transport};

type Handler = dyn Fn(&ApiRequest) -> ApiResponse;

/// Answers every request from a closure and keeps a copy of what was sent.
#[derive(Clone)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    handler: Arc<Handler>,
}

impl MockTransport {
    pub fn new(handler: impl Fn(&ApiRequest) -> ApiResponse + 'static) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            handler: Arc::new(handler),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok((self.handler)(&request))
    }
}

pub fn json_response(status: u16, value: Value) -> ApiResponse {
    ApiResponse {
        status,
        body: serde_json::to_vec(&value).unwrap(),
    }
}

pub fn text_response(status: u16, text: &str) -> ApiResponse {
    ApiResponse {
        status,
        body: text.as_bytes().to_vec(),
    }
}

pub fn property_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "city": "Ubud",
        "access_token": format!("tok-{id}"),
    })
}

pub fn user_json(id: i64, email: &str) -> Value {
    json!({"id": id, "name": "Owner", "email": email, "role": "owner"})
}

pub fn order_json(id: i64, status: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "property_id": 1,
        "upsell_id": 1,
        "guest_name": format!("Guest {id}"),
        "guest_email": format!("guest{id}@mail.example"),
        "amount": amount,
        "currency": "EUR",
        "status": status,
        "created_at": "2026-10-10T09:00:00Z",
    })
}
