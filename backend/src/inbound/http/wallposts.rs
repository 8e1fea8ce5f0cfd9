//! Wall feed API handlers.
//!
//! ```text
//! POST /api/wallposts {"message":"hi","userId":"<account uuid>"}
//! GET /api/wallposts
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountId, ApiResult, Error, Message, WallPostView};
use crate::inbound::http::state::HttpState;

/// Presence-check failure message for post creation.
pub const EMPTY_MESSAGE_MESSAGE: &str = "Cant post empty message.";

/// Post creation body for `POST /api/wallposts`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWallPostRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Envelope returned on successful post creation.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWallPostResponse {
    #[schema(example = "Wall post created")]
    pub message: &'static str,
}

/// Envelope wrapping the full feed, newest first.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WallPostsResponse {
    #[schema(example = "All wallposts retrieved successfully")]
    pub message: &'static str,
    pub wallposts: Vec<WallPostView>,
}

struct ValidatedPost {
    message: Message,
    author: AccountId,
}

impl TryFrom<CreateWallPostRequest> for ValidatedPost {
    type Error = Error;

    fn try_from(value: CreateWallPostRequest) -> Result<Self, Self::Error> {
        // The source folds a missing author into the same rejection as a
        // blank message.
        let (Some(message), Some(user_id)) = (
            value.message.filter(|m| !m.trim().is_empty()),
            value.user_id.filter(|u| !u.trim().is_empty()),
        ) else {
            return Err(Error::invalid_request(EMPTY_MESSAGE_MESSAGE));
        };
        let message =
            Message::new(message).map_err(|_| Error::invalid_request(EMPTY_MESSAGE_MESSAGE))?;
        let author = Uuid::parse_str(user_id.trim())
            .map(AccountId::from_uuid)
            .map_err(|_| Error::invalid_request("userId must be a valid UUID"))?;
        Ok(Self { message, author })
    }
}

/// Append a message to the wall.
#[utoipa::path(
    post,
    path = "/api/wallposts",
    request_body = CreateWallPostRequest,
    responses(
        (status = 201, description = "Wall post created", body = CreateWallPostResponse),
        (status = 400, description = "Missing message or author", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["wallposts"],
    operation_id = "createWallpost"
)]
#[post("/wallposts")]
pub async fn create_wallpost(
    state: web::Data<HttpState>,
    payload: web::Json<CreateWallPostRequest>,
) -> ApiResult<HttpResponse> {
    let post = ValidatedPost::try_from(payload.into_inner())?;
    state.wall.create_post(post.message, post.author).await?;
    Ok(HttpResponse::Created().json(CreateWallPostResponse {
        message: "Wall post created",
    }))
}

/// List every wall post, newest first.
#[utoipa::path(
    get,
    path = "/api/wallposts",
    responses(
        (status = 200, description = "All wall posts", body = WallPostsResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["wallposts"],
    operation_id = "getAllWallposts"
)]
#[get("/wallposts")]
pub async fn get_all_wallposts(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let wallposts = state.wall.list_posts().await?;
    Ok(HttpResponse::Ok().json(WallPostsResponse {
        message: "All wallposts retrieved successfully",
        wallposts,
    }))
}
