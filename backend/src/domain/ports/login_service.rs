//! Driving port for the authentication use-case.

use async_trait::async_trait;

use crate::domain::account::AccountProfile;
use crate::domain::auth::Credentials;
use crate::domain::error::Error;

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated account's public
    /// projection. No session or token is issued here; a future token issuer
    /// plugs in at the successful-return point.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccountProfile, Error>;
}
