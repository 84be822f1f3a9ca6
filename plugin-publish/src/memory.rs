//! In-memory transport for tests.
//!
//! Records every request and answers from a table of canned responses keyed
//! by method and URL. Unregistered requests get `200 {}`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::transport::{HttpResponse, Transport, UploadForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A request as seen by [`MemoryTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub form: Option<UploadForm>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: Mutex<HashMap<(Method, String), HttpResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body` from now on.
    pub fn respond(&self, method: Method, url: &str, status: u16, body: impl Into<String>) {
        let response = HttpResponse {
            status,
            body: body.into(),
        };
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert((method, url.to_string()), response);
        }
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn record(
        &self,
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        form: Option<UploadForm>,
    ) -> HttpResponse {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                method,
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                form,
            });
        }

        self.responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(&(method, url.to_string())).cloned())
            .unwrap_or_else(|| HttpResponse {
                status: 200,
                body: "{}".to_string(),
            })
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        Ok(self.record(Method::Get, url, headers, None))
    }

    async fn post_multipart(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: UploadForm,
    ) -> Result<HttpResponse> {
        Ok(self.record(Method::Post, url, headers, Some(form)))
    }
}
