//! Driven port for the identity store and its errors.

use async_trait::async_trait;

use crate::domain::account::{Account, EmailAddress};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by identity store adapters.
    pub enum AccountPersistenceError {
        /// Store connection could not be established or timed out.
        Connection { message: String } => "identity store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "identity store query failed: {message}",
        /// Insert rejected because the email unique key already exists.
        DuplicateEmail => "email already registered",
    }
}

/// Identity store: accounts keyed by a globally unique email.
///
/// `insert` must enforce email uniqueness atomically inside the store (a
/// unique index or equivalent), independent of any earlier existence check by
/// a caller. Under concurrent registration the store is the single arbiter of
/// "first writer wins".
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Exact-match, case-sensitive lookup by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountPersistenceError>;

    /// Insert a new account, failing with
    /// [`AccountPersistenceError::DuplicateEmail`] when the email exists.
    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError>;
}
