//! Registration workflow: uniqueness check, credential derivation, persistence.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::account::{Account, AccountProfile};
use super::error::Error;
use super::ports::{
    AccountPersistenceError, AccountRepository, RegistrationRequest, RegistrationService,
};

/// Client-facing message when the email is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str =
    "Email is already registered. Please use a different email.";

/// Registration workflow over an injected identity store.
///
/// The pre-check in step one is advisory only: two concurrent registrations
/// for the same email can both pass it. The store's insert-time uniqueness
/// enforcement is the final arbiter, and its rejection surfaces as the same
/// conflict as the pre-check.
#[derive(Clone)]
pub struct RegistrationWorkflow {
    accounts: Arc<dyn AccountRepository>,
}

impl RegistrationWorkflow {
    /// Create a workflow backed by the given identity store.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

fn map_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => Error::service_unavailable(message),
        AccountPersistenceError::Query { message } => Error::internal(message),
        AccountPersistenceError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
    }
}

#[async_trait]
impl RegistrationService for RegistrationWorkflow {
    async fn register(&self, request: RegistrationRequest) -> Result<AccountProfile, Error> {
        let RegistrationRequest {
            email,
            display_name,
            password,
        } = request;

        let existing = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let account = Account::register(email, display_name, password.expose());
        match self.accounts.insert(&account).await {
            Ok(()) => {
                info!(account_id = %account.id(), "account registered");
                Ok(account.profile())
            }
            Err(AccountPersistenceError::DuplicateEmail) => {
                // Lost the race between pre-check and insert; the store wins.
                warn!(email = %account.email(), "concurrent registration lost insert race");
                Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE))
            }
            Err(err) => Err(map_persistence_error(err)),
        }
    }
}
