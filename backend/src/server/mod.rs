//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{LoginWorkflow, RegistrationWorkflow, WallWorkflow};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{login, register};
use crate::inbound::http::wallposts::{create_wallpost, get_all_wallposts};
use crate::middleware::Trace;
use crate::outbound::memory::{MemoryAccountRepository, MemoryWallRepository};
use crate::outbound::persistence::{DieselAccountRepository, DieselWallRepository};

/// Build the handler dependency bundle from the configured stores.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let accounts = Arc::new(DieselAccountRepository::new(pool.clone()));
            let posts = Arc::new(DieselWallRepository::new(pool.clone()));
            HttpState::new(
                Arc::new(RegistrationWorkflow::new(accounts.clone())),
                Arc::new(LoginWorkflow::new(accounts)),
                Arc::new(WallWorkflow::new(posts)),
            )
        }
        None => {
            let accounts = Arc::new(MemoryAccountRepository::new());
            let posts = Arc::new(MemoryWallRepository::new(Arc::clone(&accounts)));
            HttpState::new(
                Arc::new(RegistrationWorkflow::new(accounts.clone())),
                Arc::new(LoginWorkflow::new(accounts)),
                Arc::new(WallWorkflow::new(posts)),
            )
        }
    }
}

/// Permissive CORS headers matching the browser clients the API serves.
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE"))
        .add((
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ))
}

/// Assemble the application with routes, middleware, and shared state.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(register)
        .service(login)
        .service(create_wallpost)
        .service(get_all_wallposts);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(cors_headers())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
