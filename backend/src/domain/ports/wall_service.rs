//! Driving port for the wall feed use-cases.

use async_trait::async_trait;

use crate::domain::account::AccountId;
use crate::domain::error::Error;
use crate::domain::wall::{Message, WallPostView};

/// Domain use-case port for posting to and reading the wall.
#[async_trait]
pub trait WallService: Send + Sync {
    /// Append a message to the wall on behalf of `author`.
    async fn create_post(&self, message: Message, author: AccountId) -> Result<(), Error>;

    /// List every post, newest first, with author names and relative ages.
    async fn list_posts(&self) -> Result<Vec<WallPostView>, Error>;
}
