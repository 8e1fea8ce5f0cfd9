//! Wall feed workflow: append posts and list them with author names.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::account::AccountId;
use super::error::Error;
use super::ports::{WallPersistenceError, WallRepository, WallService};
use super::wall::{Message, NewWallPost, WallPostView};

/// Wall workflow over an injected feed store.
#[derive(Clone)]
pub struct WallWorkflow {
    posts: Arc<dyn WallRepository>,
}

impl WallWorkflow {
    /// Create a workflow backed by the given feed store.
    pub fn new(posts: Arc<dyn WallRepository>) -> Self {
        Self { posts }
    }
}

fn map_persistence_error(error: WallPersistenceError) -> Error {
    match error {
        WallPersistenceError::Connection { message } => Error::service_unavailable(message),
        WallPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl WallService for WallWorkflow {
    async fn create_post(&self, message: Message, author: AccountId) -> Result<(), Error> {
        let post = NewWallPost::new(message, author);
        self.posts
            .append(&post)
            .await
            .map_err(map_persistence_error)?;
        info!(post_id = %post.id(), author = %post.author(), "wall post created");
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<WallPostView>, Error> {
        let now = Utc::now();
        let posts = self
            .posts
            .list_recent()
            .await
            .map_err(map_persistence_error)?;
        Ok(posts.into_iter().map(|post| post.into_view(now)).collect())
    }
}
