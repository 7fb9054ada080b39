//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the catalogue endpoints and the health probes
//! - **Schemas**: request/response DTOs plus domain type wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`], [`ApiErrorSchema`]) that provide
//!   OpenAPI definitions without coupling domain types to the utoipa framework
//!
//! The server-rendered pages are HTML and stay out of the document.
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::apis::{ApiEntryRequest, ApiEntryResponse};
use crate::inbound::http::schemas::{
    ApiEntryPageSchema, ApiErrorSchema, CreateApiFormSchema, ErrorCodeSchema, ErrorSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "API catalogue",
        description = "Register, list, fetch and delete API specification documents."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::apis::create_api,
        crate::inbound::http::apis::list_apis,
        crate::inbound::http::apis::get_api,
        crate::inbound::http::apis::download_specification,
        crate::inbound::http::apis::delete_api,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiEntryRequest,
        ApiEntryResponse,
        ApiEntryPageSchema,
        CreateApiFormSchema,
        ApiErrorSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "apis", description = "Catalogue entries and their specification documents"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
