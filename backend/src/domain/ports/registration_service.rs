//! Driving port for the registration use-case.
//!
//! Inbound adapters call this to create accounts without knowing the backing
//! infrastructure, which keeps HTTP handler tests deterministic: they can
//! substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::account::{AccountProfile, DisplayName, EmailAddress};
use crate::domain::auth::Password;
use crate::domain::error::Error;

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Login identifier, unique across accounts.
    pub email: EmailAddress,
    /// Name shown next to wall posts.
    pub display_name: DisplayName,
    /// Plaintext password, held only until derivation.
    pub password: Password,
}

/// Domain use-case port for account registration.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return its public projection.
    async fn register(&self, request: RegistrationRequest) -> Result<AccountProfile, Error>;
}
