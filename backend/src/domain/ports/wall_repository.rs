//! Driven port for the feed store and its errors.

use async_trait::async_trait;

use crate::domain::wall::{AuthoredWallPost, NewWallPost};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by feed store adapters.
    pub enum WallPersistenceError {
        /// Store connection could not be established or timed out.
        Connection { message: String } => "feed store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feed store query failed: {message}",
    }
}

/// Feed store: append-only wall posts referencing accounts by id.
#[async_trait]
pub trait WallRepository: Send + Sync {
    /// Append a post to the wall.
    async fn append(&self, post: &NewWallPost) -> Result<(), WallPersistenceError>;

    /// List every post, newest first, with author names resolved.
    async fn list_recent(&self) -> Result<Vec<AuthoredWallPost>, WallPersistenceError>;
}
