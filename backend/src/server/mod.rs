//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use api_catalogue::Trace;
#[cfg(debug_assertions)]
use api_catalogue::doc::ApiDoc;
use api_catalogue::inbound::http::health::{HealthState, live, ready};
use api_catalogue::inbound::http::state::HttpState;
use api_catalogue::inbound::http::{apis, views};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(apis::configure)
        .configure(views::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] holding the bind address, the
///   document store and the optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use api_catalogue::outbound::storage::CapStdSpecificationStore;
    use std::net::SocketAddr;

    #[actix_web::test]
    async fn app_serves_catalogue_pages_and_health_checks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CapStdSpecificationStore::open(dir.path()).expect("open store");
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)), store);
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app = test::init_service(build_app(AppDependencies {
            health_state,
            http_state: build_http_state(&config),
        }))
        .await;

        for uri in ["/", "/new-api", "/catalogueApi/apis", "/health/ready"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
            assert!(res.headers().contains_key("trace-id"), "GET {uri}");
        }
    }
}
