//! Presence validation for submitted catalogue entries.
//!
//! A submission must carry a non-blank `name`, `version` and
//! `specificationType`. Failures are reported as a single [`ApiError`] whose
//! message lists every missing field in that fixed order.

use serde::Serialize;

use super::NewApiEntry;

const MISSING_PARAMETERS_PREFIX: &str = "Required parameters are missing : ";

/// Fields every submission must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Version,
    SpecificationType,
}

impl RequiredField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Version => "version",
            Self::SpecificationType => "specificationType",
        }
    }
}

/// Kind of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorKind {
    MissingParameter,
}

/// Validation failure returned to clients verbatim.
///
/// Serialises as `{"type":"MISSING_PARAMETER","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    /// Report the given fields as missing.
    pub fn missing_parameters(fields: &[RequiredField]) -> Self {
        let list = fields
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            kind: ApiErrorKind::MissingParameter,
            message: format!("{MISSING_PARAMETERS_PREFIX}{list}"),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Unvalidated entry metadata as submitted by a client.
///
/// # Examples
/// ```
/// use api_catalogue::domain::ApiDraft;
///
/// let draft = ApiDraft {
///     name: Some("petstore".into()),
///     version: Some(" ".into()),
///     specification_type: None,
/// };
/// let error = draft.validate().unwrap_err();
/// assert_eq!(
///     error.message(),
///     "Required parameters are missing : version, specificationType"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDraft {
    pub name: Option<String>,
    pub version: Option<String>,
    pub specification_type: Option<String>,
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

impl ApiDraft {
    /// Required fields that are absent or blank, in reporting order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Name, self.name.as_ref()),
            (RequiredField::Version, self.version.as_ref()),
            (RequiredField::SpecificationType, self.specification_type.as_ref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(field, _)| field)
        .collect()
    }

    /// Promote the draft to a [`NewApiEntry`] once every field is present.
    pub fn validate(self) -> Result<NewApiEntry, ApiError> {
        let missing = self.missing_fields();
        match (self.name, self.version, self.specification_type) {
            (Some(name), Some(version), Some(specification_type)) if missing.is_empty() => Ok(
                NewApiEntry::from_validated(name, version, specification_type),
            ),
            _ => Err(ApiError::missing_parameters(&missing)),
        }
    }
}
