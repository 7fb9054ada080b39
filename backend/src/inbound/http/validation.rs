//! Shared request validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingPart,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingPart => "missing_part",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

/// The multipart request lacks a required part.
pub(crate) fn missing_part_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required part: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingPart.as_str(),
    }))
}

/// A path identifier is not an integer.
pub(crate) fn invalid_id_error(value: &str) -> Error {
    Error::invalid_request("id must be an integer").with_details(json!({
        "field": "id",
        "value": value,
        "code": ErrorCode::InvalidId.as_str(),
    }))
}
