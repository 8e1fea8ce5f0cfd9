//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! The adapter only translates between Diesel rows and domain types; no
//! business logic lives here. The unique index on `accounts.email` enforces
//! identifier uniqueness at insert time, which makes this store the final
//! arbiter of concurrent registrations regardless of any pre-check the
//! workflow performed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, AccountId, Digest, DisplayName, EmailAddress, Salt};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_account_diesel_error(error: diesel::result::Error) -> AccountPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) = &error {
        return AccountPersistenceError::duplicate_email();
    }
    map_diesel_error(
        error,
        AccountPersistenceError::query,
        AccountPersistenceError::connection,
    )
}

/// Convert a database row to a domain account.
///
/// Stored rows satisfied the domain invariants when written; a row that no
/// longer does indicates external tampering and maps to a query error.
fn row_to_account(row: AccountRow) -> Result<Account, AccountPersistenceError> {
    let AccountRow {
        id,
        email,
        display_name,
        salt,
        credential_digest,
        created_at,
    } = row;

    let email = EmailAddress::new(email).map_err(|err| {
        warn!(account_id = %id, error = %err, "stored account row failed validation");
        AccountPersistenceError::query("corrupt account row")
    })?;
    let display_name = DisplayName::new(display_name).map_err(|err| {
        warn!(account_id = %id, error = %err, "stored account row failed validation");
        AccountPersistenceError::query("corrupt account row")
    })?;

    Ok(Account::from_stored(
        AccountId::from_uuid(id),
        email,
        display_name,
        Salt::from_stored(salt),
        Digest::from_stored(credential_digest),
        created_at,
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountPersistenceError::connection))?;

        let row = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_account_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AccountPersistenceError::connection))?;

        let new_row = NewAccountRow {
            id: *account.id().as_uuid(),
            email: account.email().as_ref(),
            display_name: account.display_name().as_ref(),
            salt: account.salt().as_str(),
            credential_digest: account.credential_digest().as_str(),
            created_at: account.created_at(),
        };

        diesel::insert_into(accounts::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_account_diesel_error)?;

        Ok(())
    }
}
