//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

use super::apis::ApiEntryResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "api entry 7 not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ApiError`].
///
/// Validation failure naming every missing submission field.
#[derive(ToSchema)]
#[schema(as = crate::domain::ApiError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApiErrorSchema {
    /// Failure kind.
    #[schema(rename = "type", example = "MISSING_PARAMETER")]
    kind: String,
    #[schema(example = "Required parameters are missing : version, specificationType")]
    message: String,
}

/// OpenAPI schema for a page of catalogue entries.
#[derive(ToSchema)]
#[schema(as = ApiEntryPage)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApiEntryPageSchema {
    content: Vec<ApiEntryResponse>,
    /// Zero-based page number.
    page: u32,
    /// Effective page size after capping.
    page_size: u32,
    total_elements: u64,
    total_pages: u64,
}

/// OpenAPI schema for the multipart create request.
#[derive(ToSchema)]
#[schema(as = CreateApiForm)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateApiFormSchema {
    /// JSON entry document: `{"name":"...","version":"...","specificationType":"..."}`.
    #[schema(example = r#"{"name":"testApiName","version":"1.99","specificationType":"swagger"}"#)]
    api: String,
    /// Specification document; its part content type is stored and replayed
    /// on download.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_has_expected_name_and_camel_case_fields() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "missing traceId field");
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "not_found", "service_unavailable", "internal_error"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn api_error_schema_uses_type_field() {
        let schema_json = schema_to_json::<ApiErrorSchema>();
        assert!(schema_json.contains("\"type\""), "missing type field");
    }

    #[test]
    fn page_schema_uses_camel_case_fields() {
        let schema_json = schema_to_json::<ApiEntryPageSchema>();
        for field in ["content", "pageSize", "totalElements", "totalPages"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
