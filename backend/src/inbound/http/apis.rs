//! Catalogue REST handlers.
//!
//! ```text
//! POST   /catalogueApi/apis                           multipart: api (JSON), file
//! GET    /catalogueApi/apis?page=0&pageSize=50
//! GET    /catalogueApi/apis/{id}
//! GET    /catalogueApi/apis/{id}/specificationFile
//! DELETE /catalogueApi/apis/{id}
//! ```

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, delete, get, post, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ApiCatalogue;
use crate::domain::{
    ApiDraft, ApiEntry, ApiEntryId, ApiError, Error, MAX_PAGE_SIZE, SpecificationUpload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::multipart::{FormPart, FormParts};
use crate::inbound::http::schemas::{
    ApiEntryPageSchema, ApiErrorSchema, CreateApiFormSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_id_error, missing_part_error};

/// Path prefix shared by every REST endpoint.
pub const APIS_SCOPE: &str = "/catalogueApi/apis";

const API_PART: FieldName = FieldName::new("api");
const FILE_PART: FieldName = FieldName::new("file");

/// Entry metadata carried in the `api` part of a create request.
///
/// `id` and `specificationPath` are accepted and ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntryRequest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub specification_type: Option<String>,
}

impl From<ApiEntryRequest> for ApiDraft {
    fn from(value: ApiEntryRequest) -> Self {
        Self {
            name: value.name,
            version: value.version,
            specification_type: value.specification_type,
        }
    }
}

/// Stored entry as returned by the REST endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntryResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "testApiName")]
    pub name: String,
    #[schema(example = "1.99")]
    pub version: String,
    #[schema(example = "swagger")]
    pub specification_type: String,
    #[schema(example = "/catalogueApi/apis/1/specificationFile")]
    pub specification_path: String,
}

impl From<ApiEntry> for ApiEntryResponse {
    fn from(entry: ApiEntry) -> Self {
        let specification_path = entry.specification_path();
        Self {
            id: entry.id.as_i64(),
            name: entry.name,
            version: entry.version,
            specification_type: entry.specification_type,
            specification_path,
        }
    }
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

/// Paging parameters for the list endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number.
    #[serde(default)]
    pub page: u32,
    /// Entries per page; values above 50 are capped.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Failures of an upload, each rendered with its own body shape.
#[derive(Debug, thiserror::Error)]
pub enum CreateApiFailure {
    /// The `api` part is not a JSON entry document. Rendered as an empty 400.
    #[error("api part is not a valid entry document")]
    MalformedEntry,
    #[error(transparent)]
    Invalid(#[from] ApiError),
    #[error(transparent)]
    Catalogue(#[from] Error),
}

impl ResponseError for CreateApiFailure {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedEntry => StatusCode::BAD_REQUEST,
            Self::Invalid(error) => error.status_code(),
            Self::Catalogue(error) => error.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::MalformedEntry => HttpResponse::BadRequest().finish(),
            Self::Invalid(error) => error.error_response(),
            Self::Catalogue(error) => error.error_response(),
        }
    }
}

/// Validate `draft` and store it with the uploaded `file`.
///
/// Shared by the REST endpoint and the upload form.
pub(crate) async fn submit(
    catalogue: &dyn ApiCatalogue,
    draft: ApiDraft,
    file: FormPart,
) -> Result<ApiEntry, CreateApiFailure> {
    let entry = draft.validate()?;
    let upload = SpecificationUpload::new(file.content_type, file.bytes);
    Ok(catalogue.create_or_replace(entry, upload).await?)
}

fn parse_id(raw: &str) -> Result<ApiEntryId, Error> {
    raw.parse::<i64>()
        .map(ApiEntryId::new)
        .map_err(|_| invalid_id_error(raw))
}

/// Create an entry, or replace the one sharing its name and version.
#[utoipa::path(
    post,
    path = "/catalogueApi/apis",
    request_body(
        content = CreateApiFormSchema,
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Stored entry", body = ApiEntryResponse),
        (status = 400, description = "Malformed entry, missing part or missing parameters", body = ApiErrorSchema),
        (status = 503, description = "Catalogue storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["apis"],
    operation_id = "createApi"
)]
#[post("")]
pub async fn create_api(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> Result<web::Json<ApiEntryResponse>, CreateApiFailure> {
    let mut parts = FormParts::collect(payload, &[API_PART, FILE_PART]).await?;
    let api = parts
        .take(API_PART)
        .ok_or_else(|| missing_part_error(API_PART))?;
    let file = parts
        .take(FILE_PART)
        .ok_or_else(|| missing_part_error(FILE_PART))?;

    let request: ApiEntryRequest = serde_json::from_slice(&api.bytes).map_err(|error| {
        debug!(%error, "rejected malformed api part");
        CreateApiFailure::MalformedEntry
    })?;
    let stored = submit(state.catalogue.as_ref(), request.into(), file).await?;
    Ok(web::Json(stored.into()))
}

/// List entries ordered by name, then version.
#[utoipa::path(
    get,
    path = "/catalogueApi/apis",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of entries", body = ApiEntryPageSchema),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 503, description = "Catalogue storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["apis"],
    operation_id = "listApis"
)]
#[get("")]
pub async fn list_apis(
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<ApiEntryResponse>>> {
    let PageQuery { page, page_size } = query.into_inner();
    let entries = state.catalogue.get_page(page, page_size).await?;
    Ok(web::Json(entries.map(ApiEntryResponse::from)))
}

/// Fetch one entry.
#[utoipa::path(
    get,
    path = "/catalogueApi/apis/{id}",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry", body = ApiEntryResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown entry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["apis"],
    operation_id = "getApi"
)]
#[get("/{id}")]
pub async fn get_api(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApiEntryResponse>> {
    let id = parse_id(&path)?;
    let entry = state.catalogue.get(id).await?;
    Ok(web::Json(entry.into()))
}

/// Download the stored specification with its recorded content type.
#[utoipa::path(
    get,
    path = "/catalogueApi/apis/{id}/specificationFile",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Stored document bytes served with the recorded content type"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown entry or missing document", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["apis"],
    operation_id = "downloadSpecification"
)]
#[get("/{id}/specificationFile")]
pub async fn download_specification(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let download = state.catalogue.open_specification(id).await?;
    Ok(HttpResponse::Ok()
        .content_type(download.content_type)
        .body(download.bytes))
}

/// Delete an entry and its stored document.
#[utoipa::path(
    delete,
    path = "/catalogueApi/apis/{id}",
    params(("id" = i64, Path, description = "Entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown entry", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["apis"],
    operation_id = "deleteApi"
)]
#[delete("/{id}")]
pub async fn delete_api(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.catalogue.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the REST endpoints under [`APIS_SCOPE`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(APIS_SCOPE)
            .service(create_api)
            .service(list_apis)
            .service(download_specification)
            .service(get_api)
            .service(delete_api),
    );
}

#[cfg(test)]
#[path = "apis_tests.rs"]
mod tests;
