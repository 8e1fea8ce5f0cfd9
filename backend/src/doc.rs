//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for the
//! REST API: the account and wall endpoints, the health probes, and the
//! shared schema components. Swagger UI serves the document at `/docs` in
//! debug builds.

use utoipa::OpenApi;

use crate::domain::{AccountProfile, Error, ErrorCode, WallPostAuthor, WallPostView};
use crate::inbound::http::users::{AccountResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::wallposts::{
    CreateWallPostRequest, CreateWallPostResponse, WallPostsResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Happywall backend API",
        description = "HTTP interface for account registration, login, and the shared wall."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::wallposts::create_wallpost,
        crate::inbound::http::wallposts::get_all_wallposts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AccountResponse,
        CreateWallPostRequest,
        CreateWallPostResponse,
        WallPostsResponse,
        AccountProfile,
        WallPostView,
        WallPostAuthor,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "users", description = "Account registration and login"),
        (name = "wallposts", description = "Reading and posting to the wall"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
