//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::account::EmailAddress;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// A plaintext password held only in memory, zeroised on drop.
///
/// ## Invariants
/// - Non-empty; caller-provided whitespace is retained to avoid surprising
///   credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a password.
    pub fn new(password: &str) -> Result<Self, CredentialsValidationError> {
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// The plaintext, for digest derivation only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated login credentials used by the authentication workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: EmailAddress,
    password: Password,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email =
            EmailAddress::new(email).map_err(|_| CredentialsValidationError::EmptyEmail)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }

    /// Email suitable for account lookups.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password provided by the caller.
    pub const fn password(&self) -> &Password {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("   ", "pw", CredentialsValidationError::EmptyEmail)]
    #[case("a@x.com", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err =
            Credentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  a@x.com  ", "secret")]
    #[case("alice@example.org", "correct horse battery staple")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds =
            Credentials::try_from_parts(email, password).expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim());
        assert_eq!(creds.password().expose(), password);
    }
}
