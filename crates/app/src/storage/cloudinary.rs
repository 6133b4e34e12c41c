//! Cloudinary unsigned uploads.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::Deserialize;

use crate::storage::{EvidenceImage, EvidenceStore, StorageError, StoredImage};

pub const DEFAULT_CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// API origin, e.g. `"https://api.cloudinary.com"`.
    pub api_base: String,

    pub cloud_name: String,

    /// Name of an unsigned upload preset configured on the cloud.
    pub upload_preset: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http: Client,
}

impl CloudinaryClient {
    #[must_use]
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl EvidenceStore for CloudinaryClient {
    async fn upload(
        &self,
        image: EvidenceImage,
        folder: &str,
    ) -> Result<StoredImage, StorageError> {
        let file = data_uri(&image);

        let form = [
            ("file", file.as_str()),
            ("upload_preset", self.config.upload_preset.as_str()),
            ("folder", folder),
        ];

        let response = self
            .http
            .post(self.upload_url())
            .form(&form)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| "unreadable error body".to_string());

            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let uploaded: UploadResponse = response.json().await?;

        tracing::debug!(url = %uploaded.secure_url, folder, "evidence image uploaded");

        Ok(StoredImage {
            url: uploaded.secure_url,
        })
    }
}

fn data_uri(image: &EvidenceImage) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        BASE64.encode(&image.bytes)
    )
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_embeds_content_type_and_base64_payload() {
        let image = EvidenceImage {
            bytes: b"png".to_vec(),
            content_type: "image/png".to_string(),
        };

        assert_eq!(data_uri(&image), "data:image/png;base64,cG5n");
    }

    #[test]
    fn upload_url_ignores_trailing_slash_on_base() {
        let client = CloudinaryClient::new(CloudinaryConfig {
            api_base: "https://api.cloudinary.com/".to_string(),
            cloud_name: "demo".to_string(),
            upload_preset: "returns".to_string(),
        });

        assert_eq!(
            client.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}
