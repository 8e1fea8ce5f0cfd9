//! Account aggregate and its validated value types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::credential::{Digest, Salt};

/// Validation errors returned by the account value-type constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Display name was missing or blank once trimmed.
    EmptyDisplayName,
    /// Display name exceeded the maximum length.
    DisplayNameTooLong {
        /// Maximum number of characters permitted.
        max: usize,
    },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier stored as a UUID, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from the store.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login identifier for an account.
///
/// ## Invariants
/// - Trimmed of surrounding whitespace and non-empty.
/// - Compared exactly, case-sensitively; uniqueness across accounts is
///   enforced by the identity store, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        let email: String = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

/// Human readable name shown next to wall posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a display name.
    pub fn new(name: impl Into<String>) -> Result<Self, AccountValidationError> {
        let name: String = name.into();
        if name.trim().is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        if name.chars().count() > DISPLAY_NAME_MAX {
            return Err(AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `email` is unique across all accounts (enforced by the identity store).
/// - `salt` is generated once at creation and never reused across accounts.
/// - `credential_digest` is always the codec output for some plaintext under
///   `salt`; it is never set directly and never equals the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: EmailAddress,
    display_name: DisplayName,
    salt: Salt,
    credential_digest: Digest,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account from validated inputs, generating the salt and
    /// deriving the credential digest inline.
    ///
    /// No constructed value ever holds the plaintext password.
    pub fn register(email: EmailAddress, display_name: DisplayName, plaintext: &str) -> Self {
        let salt = Salt::generate();
        let credential_digest = Digest::derive(plaintext, &salt);
        Self {
            id: AccountId::random(),
            email,
            display_name,
            salt,
            credential_digest,
            created_at: Utc::now(),
        }
    }

    /// Reassemble an account from its stored fields.
    pub const fn from_stored(
        id: AccountId,
        email: EmailAddress,
        display_name: DisplayName,
        salt: Salt,
        credential_digest: Digest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            salt,
            credential_digest,
            created_at,
        }
    }

    /// Stable account identifier.
    pub const fn id(&self) -> &AccountId {
        &self.id
    }

    /// Login identifier.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Name shown to other users.
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Per-account salt.
    pub const fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Derived credential digest.
    pub const fn credential_digest(&self) -> &Digest {
        &self.credential_digest
    }

    /// Creation timestamp, kept for audit only.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check a plaintext password against the stored credential.
    pub fn authenticate(&self, plaintext: &str) -> bool {
        super::credential::verify(plaintext, &self.salt, &self.credential_digest)
    }

    /// The subset of the account safe to return to clients.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            name: self.display_name.clone(),
            id: *self.id.as_uuid(),
        }
    }
}

/// Public projection of an account: never carries salt or digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountProfile {
    /// Display name shown to clients.
    #[schema(value_type = String, example = "Ada")]
    pub name: DisplayName,
    /// Stable account identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn account(password: &str) -> Account {
        Account::register(
            EmailAddress::new("a@x.com").expect("valid email"),
            DisplayName::new("A").expect("valid name"),
            password,
        )
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn email_rejects_blank_input(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::new(raw).expect_err("blank email must fail"),
            AccountValidationError::EmptyEmail
        );
    }

    #[test]
    fn email_is_trimmed_but_case_preserving() {
        let email = EmailAddress::new("  Ada@X.com ").expect("valid email");
        assert_eq!(email.as_ref(), "Ada@X.com");
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyDisplayName)]
    #[case("   ", AccountValidationError::EmptyDisplayName)]
    fn display_name_rejects_blank_input(
        #[case] raw: &str,
        #[case] expected: AccountValidationError,
    ) {
        assert_eq!(
            DisplayName::new(raw).expect_err("blank name must fail"),
            expected
        );
    }

    #[test]
    fn display_name_enforces_maximum_length() {
        let raw = "x".repeat(DISPLAY_NAME_MAX + 1);
        assert_eq!(
            DisplayName::new(raw).expect_err("over-long name must fail"),
            AccountValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX
            }
        );
        assert!(DisplayName::new("x".repeat(DISPLAY_NAME_MAX)).is_ok());
    }

    #[test]
    fn register_derives_a_non_plaintext_credential() {
        let account = account("pw1");
        assert_ne!(account.credential_digest().as_str(), "pw1");
        assert!(!account.credential_digest().is_empty());
    }

    #[test]
    fn registered_account_authenticates_its_own_password() {
        let account = account("pw1");
        assert!(account.authenticate("pw1"));
        assert!(!account.authenticate("pw2"));
        assert!(!account.authenticate(""));
    }

    #[test]
    fn two_accounts_with_the_same_password_differ_in_digest() {
        let first = account("shared");
        let second = account("shared");
        assert_ne!(first.salt(), second.salt());
        assert_ne!(first.credential_digest(), second.credential_digest());
    }

    #[test]
    fn profile_exposes_only_name_and_id() {
        let account = account("pw1");
        let profile = account.profile();
        assert_eq!(profile.name, *account.display_name());
        assert_eq!(profile.id, *account.id().as_uuid());
        let json = serde_json::to_value(&profile).expect("serialisable profile");
        let object = json.as_object().expect("object payload");
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("name"));
        assert!(object.contains_key("id"));
    }
}
