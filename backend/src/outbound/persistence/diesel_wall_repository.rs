//! PostgreSQL-backed `WallRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{WallPersistenceError, WallRepository};
use crate::domain::{AccountId, AuthoredWallPost, DisplayName, Message, NewWallPost};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewWallPostRow, WallPostRow};
use super::pool::DbPool;
use super::schema::{accounts, wall_posts};

/// Diesel-backed implementation of the `WallRepository` port.
#[derive(Clone)]
pub struct DieselWallRepository {
    pool: DbPool,
}

impl DieselWallRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_wall_diesel_error(error: diesel::result::Error) -> WallPersistenceError {
    map_diesel_error(
        error,
        WallPersistenceError::query,
        WallPersistenceError::connection,
    )
}

fn row_to_post(
    row: WallPostRow,
    author_name: String,
) -> Result<AuthoredWallPost, WallPersistenceError> {
    let WallPostRow {
        id,
        message,
        author_id,
        created_at,
    } = row;

    let message = Message::new(message).map_err(|err| {
        warn!(post_id = %id, error = %err, "stored wall post row failed validation");
        WallPersistenceError::query("corrupt wall post row")
    })?;
    let author_name = DisplayName::new(author_name).map_err(|err| {
        warn!(post_id = %id, error = %err, "stored wall post row failed validation");
        WallPersistenceError::query("corrupt wall post row")
    })?;

    Ok(AuthoredWallPost {
        id,
        message,
        author: AccountId::from_uuid(author_id),
        author_name,
        created_at,
    })
}

#[async_trait]
impl WallRepository for DieselWallRepository {
    async fn append(&self, post: &NewWallPost) -> Result<(), WallPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, WallPersistenceError::connection))?;

        let new_row = NewWallPostRow {
            id: *post.id(),
            message: post.message().as_ref(),
            author_id: *post.author().as_uuid(),
        };

        diesel::insert_into(wall_posts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_wall_diesel_error)?;

        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<AuthoredWallPost>, WallPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, WallPersistenceError::connection))?;

        let rows: Vec<(WallPostRow, String)> = wall_posts::table
            .inner_join(accounts::table)
            .select((WallPostRow::as_select(), accounts::display_name))
            .order(wall_posts::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_wall_diesel_error)?;

        rows.into_iter()
            .map(|(row, author_name)| row_to_post(row, author_name))
            .collect()
    }
}
