use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;

use crate::error::Result;

/// Status and body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Multipart upload of one binary file plus one JSON text field.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub file_field: String,
    pub file_name: String,
    pub file_content: Vec<u8>,
    pub json_field: String,
    pub json: serde_json::Value,
}

/// HTTP operations the upload clients need.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;

    async fn post_multipart(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: UploadForm,
    ) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    http_client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(concat!("plugin-publish/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        let mut request = self.http_client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }

    async fn post_multipart(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: UploadForm,
    ) -> Result<HttpResponse> {
        let content_type = get_content_type(&form.file_name);
        let file_part = Part::bytes(form.file_content)
            .file_name(form.file_name)
            .mime_str(content_type)?;

        let multipart = Form::new()
            .part(form.file_field, file_part)
            .text(form.json_field, serde_json::to_string(&form.json)?);

        let mut request = self.http_client.post(url).multipart(multipart);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Ok(HttpResponse { status, body })
    }
}

/// Determine content type for an uploaded artifact
pub fn get_content_type(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match extension {
        "jar" => "application/java-archive",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
