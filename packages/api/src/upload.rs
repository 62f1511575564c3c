//! Image upload for property hero images and upsell pictures.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::transport::{FilePart, Transport};

/// Largest image the backend accepts.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// An image picked in a form, read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn content_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }

    fn into_part(self) -> FilePart {
        FilePart {
            field: "image".to_string(),
            content_type: self.content_type().to_string(),
            file_name: self.file_name,
            bytes: self.bytes,
        }
    }
}

#[derive(Deserialize)]
struct Uploaded {
    url: String,
}

impl<T: Transport> ApiClient<T> {
    /// Upload an image and return its public URL.
    pub async fn upload_image(&self, image: ImageUpload) -> Result<String> {
        if image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::Status {
                status: 413,
                message: "Image is larger than 5 MB.".to_string(),
            });
        }
        let name = image.file_name.clone();
        let uploaded: Uploaded = self.post_file("/upload", image.into_part()).await?;
        tracing::info!("uploaded {name} -> {}", uploaded.url);
        Ok(uploaded.url)
    }

    /// The image URL a form should submit: a newly chosen file is uploaded
    /// first, otherwise the existing URL (possibly empty) passes through.
    pub async fn resolve_image_url(
        &self,
        chosen: Option<ImageUpload>,
        existing: String,
    ) -> Result<String> {
        match chosen {
            Some(image) => self.upload_image(image).await,
            None => Ok(existing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{json_response, MockTransport};
    use crate::transport::RequestBody;
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_sends_multipart_image_field() {
        let mock = MockTransport::new(|_| json_response(200, json!({"url": "https://cdn.example/a.png"})));
        let client = ApiClient::with_transport(mock.clone());

        let url = client
            .upload_image(ImageUpload::new("a.PNG", vec![1, 2, 3]))
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example/a.png");

        match mock.last().body {
            RequestBody::Multipart(part) => {
                assert_eq!(part.field, "image");
                assert_eq!(part.content_type, "image/png");
                assert_eq!(part.bytes, vec![1, 2, 3]);
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_existing_url_passes_through_without_upload() {
        let mock = MockTransport::new(|_| json_response(200, json!({"url": "new"})));
        let client = ApiClient::with_transport(mock.clone());

        let url = client
            .resolve_image_url(None, "https://cdn.example/old.jpg".to_string())
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.example/old.jpg");
        assert_eq!(client.resolve_image_url(None, String::new()).await.unwrap(), "");
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_image_is_refused() {
        let mock = MockTransport::new(|_| json_response(200, json!({"url": "x"})));
        let client = ApiClient::with_transport(mock.clone());
        let big = ImageUpload::new("big.jpg", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(client.upload_image(big).await.is_err());
        assert!(mock.requests().is_empty());
    }
}
