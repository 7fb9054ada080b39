//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::error::PayloadError;
use actix_web::http::header::{self, HeaderMap, HeaderValue};
use actix_web::web::Bytes;
use futures_util::stream;

use crate::domain::ports::ApiCatalogue;

use super::state::HttpState;

/// Boundary used by every test multipart body.
pub const BOUNDARY: &str = "----CatalogueTestBoundary7MA4YWxkTrZu0gW";

/// Builder for `multipart/form-data` request bodies.
#[derive(Debug, Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain form field.
    pub fn text(self, name: &str, value: &str) -> Self {
        self.part(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
            value.as_bytes(),
        )
    }

    /// Append a file field, optionally declaring its content type.
    pub fn file(self, name: &str, filename: &str, content_type: Option<&str>, data: &[u8]) -> Self {
        let mut headers =
            format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n");
        if let Some(content_type) = content_type {
            headers.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        self.part(headers, data)
    }

    fn part(mut self, headers: String, data: &[u8]) -> Self {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}\r\n{headers}\r\n").as_bytes());
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Value for the request `Content-Type` header.
    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    /// Finished body including the closing delimiter.
    pub fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }
}

/// Build a `Multipart` extractor over `body` for adapter-level tests.
pub fn multipart_payload(body: MultipartBody) -> Multipart {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&MultipartBody::content_type()).expect("valid content type"),
    );
    let bytes = Bytes::from(body.finish());
    Multipart::new(
        &headers,
        stream::once(async move { Ok::<_, PayloadError>(bytes) }),
    )
}

/// Wrap a catalogue port in handler state.
pub fn state_with(catalogue: impl ApiCatalogue + 'static) -> HttpState {
    HttpState::new(Arc::new(catalogue))
}
