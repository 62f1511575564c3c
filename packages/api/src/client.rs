//! The HTTP gateway every view talks through.

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, ApiResponse, FilePart, HttpTransport, Method, Transport};

/// Backend client: base URL (via the transport) plus bearer-token injection.
///
/// Cloning is cheap and clones share the token, so logging in through one
/// handle authenticates every other handle.
#[derive(Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    token: Arc<Mutex<Option<String>>>,
}

impl ApiClient<HttpTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(HttpTransport::new(base_url))
    }
}

/// Some backends wrap payloads as `{ "data": ... }`; accept both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<R> {
    Wrapped { data: R },
    Bare(R),
}

impl<R> Envelope<R> {
    fn into_inner(self) -> R {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(r) => r,
        }
    }
}

fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    let envelope: Envelope<R> = serde_json::from_slice(body)?;
    Ok(envelope.into_inner())
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            token: Arc::new(Mutex::new(None)),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Send a request with the current token attached; non-2xx becomes an error.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        request.bearer = self.token();
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!("{} {}", method.as_str(), path);

        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!("{} {} failed: {e}", method.as_str(), path);
        })?;

        if response.is_success() {
            Ok(response)
        } else {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!("{} {} -> {}: {err}", method.as_str(), path, response.status);
            Err(err)
        }
    }

    async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let response = self.send(request).await?;
        decode(&response.body)
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.send_json(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn get_with_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<R> {
        self.send_json(ApiRequest::new(Method::Get, path).with_query(query))
            .await
    }

    /// GET returning the raw body as text, for CSV exports.
    pub async fn get_text(&self, path: &str, query: Vec<(String, String)>) -> Result<String> {
        let response = self
            .send(ApiRequest::new(Method::Get, path).with_query(query))
            .await?;
        String::from_utf8(response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let json = serde_json::to_value(body)?;
        self.send_json(ApiRequest::new(Method::Post, path).with_json(json))
            .await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let json = serde_json::to_value(body)?;
        self.send_json(ApiRequest::new(Method::Put, path).with_json(json))
            .await
    }

    /// PUT whose response body is ignored.
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let json = serde_json::to_value(body)?;
        self.send(ApiRequest::new(Method::Put, path).with_json(json))
            .await
            .map(|_| ())
    }

    /// POST without a body whose response body is ignored.
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::new(Method::Post, path))
            .await
            .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::new(Method::Delete, path))
            .await
            .map(|_| ())
    }

    pub async fn post_file<R: DeserializeOwned>(&self, path: &str, part: FilePart) -> Result<R> {
        self.send_json(ApiRequest::new(Method::Post, path).with_file(part))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{json_response, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_bearer_token_is_attached_after_login() {
        let mock = MockTransport::new(|_| json_response(200, json!({"ok": true})));
        let client = ApiClient::with_transport(mock.clone());

        let _: serde_json::Value = client.get("/me").await.unwrap();
        client.set_token(Some("secret".to_string()));
        let _: serde_json::Value = client.get("/me").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].bearer, None);
        assert_eq!(requests[1].bearer.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_clones_share_token() {
        let client = ApiClient::with_transport(MockTransport::new(|_| json_response(200, json!(null))));
        let other = client.clone();
        client.set_token(Some("t".to_string()));
        assert_eq!(other.token().as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn test_wrapped_and_bare_payloads_decode() {
        let mock = MockTransport::new(|req| match req.path.as_str() {
            "/wrapped" => json_response(200, json!({"data": [1, 2]})),
            _ => json_response(200, json!([3])),
        });
        let client = ApiClient::with_transport(mock);
        let a: Vec<i32> = client.get("/wrapped").await.unwrap();
        let b: Vec<i32> = client.get("/bare").await.unwrap();
        assert_eq!(a, vec![1, 2]);
        assert_eq!(b, vec![3]);
    }

    #[tokio::test]
    async fn test_error_status_becomes_api_error() {
        let mock = MockTransport::new(|_| json_response(404, json!({"message": "Property not found"})));
        let client = ApiClient::with_transport(mock);
        let err = client.get::<serde_json::Value>("/properties/9").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "Property not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let mock = MockTransport::new(|_| ApiResponse { status: 204, body: Vec::new() });
        let client = ApiClient::with_transport(mock);
        let unit: () = client.put("/orders/1/status", &json!({"status": "confirmed"})).await.unwrap();
        assert_eq!(unit, ());
    }
}
