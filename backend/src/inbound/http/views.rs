//! Server-rendered catalogue pages.
//!
//! ```text
//! GET  /?page=0    entry list, 50 per page
//! GET  /new-api    upload form
//! POST /new-api    multipart: name, version, specificationType, file
//! ```
//!
//! Markup is assembled by hand; every interpolated value is escaped.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpResponse, ResponseError, get, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{ApiDraft, ApiEntry, ApiError, ErrorCode, MAX_PAGE_SIZE, ViewApi};
use crate::inbound::http::ApiResult;
use crate::inbound::http::apis::{CreateApiFailure, submit};
use crate::inbound::http::multipart::FormParts;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_part_error};

const NAME_FIELD: FieldName = FieldName::new("name");
const VERSION_FIELD: FieldName = FieldName::new("version");
const TYPE_FIELD: FieldName = FieldName::new("specificationType");
const FILE_FIELD: FieldName = FieldName::new("file");

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Query parameters of the list page.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: u32,
}

/// Outcome shown above the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Banner {
    None,
    Success(String),
    Failure(String),
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"/><title>{title}</title></head>\n\
         <body>\n<nav><a href=\"/\">Catalogue</a> | <a href=\"/new-api\">Add an API</a></nav>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n"
    )
}

fn html_response(status: StatusCode, html: String) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, HTML_CONTENT_TYPE))
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(html)
}

fn render_list(rows: &[ViewApi], page: u32, has_previous: bool, has_next: bool) -> String {
    let mut body = String::new();
    if rows.is_empty() {
        body.push_str("<p>No APIs have been catalogued yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>API</th><th>Specification type</th><th>Specification</th></tr></thead>\n<tbody>\n",
        );
        for row in rows {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td><a href=\"{}\">download</a></td></tr>\n",
                html_escape(&row.display_name),
                html_escape(&row.specification_type),
                html_escape(&row.download_link),
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    if has_previous {
        body.push_str(&format!(
            "<a rel=\"prev\" href=\"/?page={}\">Previous</a>\n",
            page.saturating_sub(1)
        ));
    }
    if has_next {
        body.push_str(&format!(
            "<a rel=\"next\" href=\"/?page={}\">Next</a>\n",
            page.saturating_add(1)
        ));
    }
    page_shell("API catalogue", &body)
}

fn render_form(banner: &Banner) -> String {
    let mut body = String::new();
    match banner {
        Banner::None => {}
        Banner::Success(message) => body.push_str(&format!(
            "<p class=\"banner success\">{}</p>\n",
            html_escape(message)
        )),
        Banner::Failure(message) => body.push_str(&format!(
            "<p class=\"banner failure\">Upload failed: {}</p>\n",
            html_escape(message)
        )),
    }
    body.push_str(
        "<form method=\"post\" action=\"/new-api\" enctype=\"multipart/form-data\">\n\
         <label>Name <input type=\"text\" name=\"name\"/></label><br/>\n\
         <label>Version <input type=\"text\" name=\"version\"/></label><br/>\n\
         <label>Specification type <input type=\"text\" name=\"specificationType\"/></label><br/>\n\
         <label>Specification file <input type=\"file\" name=\"file\"/></label><br/>\n\
         <button type=\"submit\">Upload</button>\n\
         </form>\n",
    );
    page_shell("Add an API", &body)
}

/// List catalogue entries, 50 per page.
#[get("/")]
pub async fn list_page(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .catalogue
        .get_page(query.page, MAX_PAGE_SIZE)
        .await?;
    let rows: Vec<ViewApi> = page.content().iter().map(ViewApi::from).collect();
    let html = render_list(&rows, page.page(), page.has_previous(), page.has_next());
    Ok(html_response(StatusCode::OK, html))
}

/// Render the empty upload form.
#[get("/new-api")]
pub async fn new_api_form() -> HttpResponse {
    html_response(StatusCode::OK, render_form(&Banner::None))
}

async fn store_submission(
    state: &HttpState,
    payload: Multipart,
) -> Result<ApiEntry, CreateApiFailure> {
    let mut parts = FormParts::collect(
        payload,
        &[NAME_FIELD, VERSION_FIELD, TYPE_FIELD, FILE_FIELD],
    )
    .await?;
    let draft = ApiDraft {
        name: parts.take_text(NAME_FIELD)?,
        version: parts.take_text(VERSION_FIELD)?,
        specification_type: parts.take_text(TYPE_FIELD)?,
    };
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::missing_parameters(&missing).into());
    }
    let file = parts
        .take(FILE_FIELD)
        .ok_or_else(|| missing_part_error(FILE_FIELD))?;
    submit(state.catalogue.as_ref(), draft, file).await
}

/// Store a submission from the upload form and re-render it with the outcome.
///
/// Validation failures keep a 200 status; storage failures use the status of
/// the underlying error. Internal error detail is never shown.
#[post("/new-api")]
pub async fn submit_new_api(state: web::Data<HttpState>, payload: Multipart) -> HttpResponse {
    let outcome = store_submission(&state, payload).await;

    match outcome {
        Ok(entry) => {
            info!(id = %entry.id, "stored api entry from upload form");
            let banner = Banner::Success(format!(
                "{} - {} was saved",
                entry.name, entry.version
            ));
            html_response(StatusCode::OK, render_form(&banner))
        }
        Err(CreateApiFailure::Invalid(error)) => html_response(
            StatusCode::OK,
            render_form(&Banner::Failure(error.message().to_owned())),
        ),
        Err(CreateApiFailure::MalformedEntry) => html_response(
            StatusCode::BAD_REQUEST,
            render_form(&Banner::Failure("the submission could not be read".to_owned())),
        ),
        Err(CreateApiFailure::Catalogue(error)) => {
            let status = error.status_code();
            let message = if error.code() == ErrorCode::InternalError {
                "Internal server error".to_owned()
            } else {
                error.message().to_owned()
            };
            html_response(status, render_form(&Banner::Failure(message)))
        }
    }
}

/// Register the view endpoints.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_page)
        .service(new_api_form)
        .service(submit_new_api);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::ports::MockApiCatalogue;
    use crate::domain::{ApiEntryId, Error, SpecificationFile, SpecificationFileId};
    use crate::inbound::http::test_utils::{MultipartBody, state_with};
    use actix_web::{App, test as actix_test};
    use pagination::{Page, PageRequest};
    use rstest::rstest;

    fn test_app(
        catalogue: MockApiCatalogue,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state_with(catalogue)))
            .configure(configure)
    }

    fn entry(id: i64, name: &str) -> ApiEntry {
        ApiEntry {
            id: ApiEntryId::new(id),
            name: name.to_owned(),
            version: "1.0".to_owned(),
            specification_type: "swagger".to_owned(),
            specification_file: SpecificationFile {
                id: SpecificationFileId::new(id),
                content_type: "application/json".to_owned(),
                file_path: PathBuf::from("/srv/specs/specification_a"),
            },
        }
    }

    fn form_request(body: MultipartBody) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/new-api")
            .insert_header((CONTENT_TYPE, MultipartBody::content_type()))
            .set_payload(body.finish())
            .to_request()
    }

    async fn body_text(response: actix_web::dev::ServiceResponse) -> String {
        let bytes = actix_test::read_body(response).await;
        String::from_utf8(bytes.to_vec()).expect("utf-8 html")
    }

    #[rstest]
    fn escaping_neutralises_markup() {
        assert_eq!(
            html_escape(r#"<script>"x" & 'y'</script>"#),
            "&lt;script&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn list_shows_rows_and_next_link() {
        let mut catalogue = MockApiCatalogue::new();
        catalogue
            .expect_get_page()
            .withf(|page, size| *page == 0 && *size == MAX_PAGE_SIZE)
            .times(1)
            .return_once(|page, size| {
                let request = PageRequest::new(page, size).expect("valid request");
                Ok(Page::new(vec![entry(1, "<petstore>")], request, 51))
            });
        let app = actix_test::init_service(test_app(catalogue)).await;

        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("&lt;petstore&gt; - 1.0"));
        assert!(html.contains("href=\"/catalogueApi/apis/1/specificationFile\""));
        assert!(html.contains("href=\"/?page=1\""));
        assert!(!html.contains("rel=\"prev\""));
    }

    #[rstest]
    #[actix_web::test]
    async fn empty_form_has_all_fields() {
        let app = actix_test::init_service(test_app(MockApiCatalogue::new())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/new-api").to_request(),
        )
        .await;

        let html = body_text(response).await;
        for field in ["name", "version", "specificationType", "file"] {
            assert!(html.contains(&format!("name=\"{field}\"")), "missing {field}");
        }
        assert!(!html.contains("banner"));
    }

    #[rstest]
    #[actix_web::test]
    async fn successful_upload_shows_success_banner() {
        let mut catalogue = MockApiCatalogue::new();
        catalogue
            .expect_create_or_replace()
            .withf(|entry, upload| entry.name() == "orders" && upload.bytes() == b"spec")
            .times(1)
            .return_once(|_, _| Ok(entry(4, "orders")));
        let app = actix_test::init_service(test_app(catalogue)).await;
        let body = MultipartBody::new()
            .text("name", "orders")
            .text("version", "1.0")
            .text("specificationType", "swagger")
            .file("file", "orders.json", Some("application/json"), b"spec");

        let response = actix_test::call_service(&app, form_request(body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("banner success"));
        assert!(html.contains("orders - 1.0 was saved"));
    }

    #[rstest]
    #[actix_web::test]
    async fn incomplete_upload_shows_validation_message() {
        let mut catalogue = MockApiCatalogue::new();
        catalogue.expect_create_or_replace().never();
        let app = actix_test::init_service(test_app(catalogue)).await;
        let body = MultipartBody::new()
            .text("name", "orders")
            .text("version", "")
            .file("file", "orders.json", None, b"spec");

        let response = actix_test::call_service(&app, form_request(body)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("banner failure"));
        assert!(html.contains("Required parameters are missing : version, specificationType"));
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_failures_are_redacted_in_the_banner() {
        let mut catalogue = MockApiCatalogue::new();
        catalogue
            .expect_create_or_replace()
            .times(1)
            .return_once(|_, _| Err(Error::internal("disk full at /srv/specs")));
        let app = actix_test::init_service(test_app(catalogue)).await;
        let body = MultipartBody::new()
            .text("name", "orders")
            .text("version", "1.0")
            .text("specificationType", "swagger")
            .file("file", "orders.json", None, b"spec");

        let response = actix_test::call_service(&app, form_request(body)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("Internal server error"));
        assert!(!html.contains("/srv/specs"));
    }
}
