//! Shared harness for HTTP integration suites.
//!
//! Builds the full application over the in-memory repository and a temporary
//! specifications folder, and provides a multipart body builder for uploads.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use api_catalogue::Trace;
use api_catalogue::domain::ApiCatalogueService;
use api_catalogue::inbound::http::health::{HealthState, live, ready};
use api_catalogue::inbound::http::state::HttpState;
use api_catalogue::inbound::http::{apis, views};
use api_catalogue::outbound::memory::InMemoryApiEntryRepository;
use api_catalogue::outbound::storage::CapStdSpecificationStore;
use tempfile::TempDir;

/// Boundary used by every test multipart body.
const BOUNDARY: &str = "----CatalogueTestBoundary7MA4YWxkTrZu0gW";

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

/// POST `body` to `uri` as `multipart/form-data`.
pub fn multipart_request(uri: &str, body: MultipartBody) -> Request {
    TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, MultipartBody::content_type()))
        .set_payload(body.finish())
        .to_request()
}

/// Multipart upload for the REST create endpoint.
pub fn create_request(api_json: &str, content_type: &str, data: &[u8]) -> Request {
    multipart_request(
        apis::APIS_SCOPE,
        MultipartBody::new()
            .text("api", api_json)
            .file("file", "specification", Some(content_type), data),
    )
}

/// Application under test plus the folder backing its document store.
pub struct TestCatalogue {
    pub dir: TempDir,
    pub store: CapStdSpecificationStore,
}

impl TestCatalogue {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CapStdSpecificationStore::open(dir.path()).expect("open store");
        Self { dir, store }
    }

    /// Number of documents currently held in the specifications folder.
    pub fn stored_documents(&self) -> usize {
        std::fs::read_dir(self.dir.path())
            .expect("read specifications folder")
            .count()
    }

    pub async fn init(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
        let catalogue = ApiCatalogueService::new(
            Arc::new(InMemoryApiEntryRepository::new()),
            Arc::new(self.store.clone()),
        );
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::new(Arc::new(catalogue))))
                .app_data(health)
                .wrap(Trace)
                .configure(apis::configure)
                .configure(views::configure)
                .service(ready)
                .service(live),
        )
        .await
    }
}
