//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, wall_posts};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub salt: String,
    pub credential_digest: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub salt: &'a str,
    pub credential_digest: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the wall_posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = wall_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WallPostRow {
    pub id: Uuid,
    pub message: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new wall post records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = wall_posts)]
pub(crate) struct NewWallPostRow<'a> {
    pub id: Uuid,
    pub message: &'a str,
    pub author_id: Uuid,
}
