//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! Diesel uses them for compile-time query validation and type-safe SQL.

diesel::table! {
    /// Registered accounts.
    ///
    /// The unique index on `email` is the single arbiter of identifier
    /// uniqueness under concurrent registration.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login identifier; unique, compared case-sensitively.
        email -> Varchar,
        /// Human-readable display name (max 32 characters).
        display_name -> Varchar,
        /// Per-account random salt, hex-encoded.
        salt -> Varchar,
        /// Keyed one-way digest of the password, hex-encoded.
        credential_digest -> Varchar,
        /// Record creation timestamp, kept for audit.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Wall posts referencing their author account.
    wall_posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Message body, non-empty.
        message -> Text,
        /// Posting account (no cascade on account deletion).
        author_id -> Uuid,
        /// Record creation timestamp; listing orders on this, newest first.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(wall_posts -> accounts (author_id));
diesel::allow_tables_to_appear_in_same_query!(accounts, wall_posts);
