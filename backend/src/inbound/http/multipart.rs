//! Multipart form collection shared by the REST and view upload endpoints.
//!
//! Parts are buffered whole; uploads carry no size limit. Only the named
//! parts a handler asks for are kept, the rest are drained and dropped. When
//! a part name repeats, the first occurrence wins.

use std::collections::HashMap;

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::CONTENT_TYPE;
use futures_util::TryStreamExt as _;
use tracing::debug;

use crate::domain::Error;

use super::validation::FieldName;

/// One buffered multipart part.
///
/// `content_type` is the part's raw `Content-Type` header, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormPart {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Buffered parts of a multipart request, keyed by part name.
#[derive(Debug, Default)]
pub(crate) struct FormParts {
    parts: HashMap<&'static str, FormPart>,
}

fn map_multipart_error(error: MultipartError) -> Error {
    debug!(%error, "malformed multipart payload");
    Error::invalid_request(format!("malformed multipart payload: {error}"))
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

impl FormParts {
    /// Read every part of `payload`, keeping those named in `accepted`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the payload is not well-formed
    /// multipart data.
    pub(crate) async fn collect(
        mut payload: Multipart,
        accepted: &[FieldName],
    ) -> Result<Self, Error> {
        let mut collected = Self::default();
        while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
            let wanted = field
                .name()
                .and_then(|name| accepted.iter().find(|candidate| candidate.as_str() == name))
                .map(FieldName::as_str)
                .filter(|name| !collected.parts.contains_key(name));
            let content_type = field
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let bytes = read_field(&mut field).await?;

            if let Some(name) = wanted {
                collected.parts.insert(name, FormPart {
                    content_type,
                    bytes,
                });
            }
        }
        Ok(collected)
    }

    /// Remove and return the named part.
    pub(crate) fn take(&mut self, name: FieldName) -> Option<FormPart> {
        self.parts.remove(name.as_str())
    }

    /// Remove the named part and decode it as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error when the part is not valid UTF-8.
    pub(crate) fn take_text(&mut self, name: FieldName) -> Result<Option<String>, Error> {
        self.take(name)
            .map(|part| {
                String::from_utf8(part.bytes).map_err(|_| {
                    Error::invalid_request(format!("{} must be UTF-8 text", name.as_str()))
                })
            })
            .transpose()
    }
}
