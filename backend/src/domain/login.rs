//! Authentication workflow: lookup plus digest verification.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::account::AccountProfile;
use super::auth::Credentials;
use super::error::Error;
use super::ports::{AccountPersistenceError, AccountRepository, LoginService};

/// Client-facing message when no account matches the email.
pub const UNKNOWN_ACCOUNT_MESSAGE: &str =
    "User with that email does not exist. Please register first.";

/// Client-facing message when the password does not verify.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect password";

/// Authentication workflow over an injected identity store.
#[derive(Clone)]
pub struct LoginWorkflow {
    accounts: Arc<dyn AccountRepository>,
}

impl LoginWorkflow {
    /// Create a workflow backed by the given identity store.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

fn map_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => Error::service_unavailable(message),
        AccountPersistenceError::Query { message } => Error::internal(message),
        // A uniqueness violation cannot arise from a read; treat it as a
        // store fault rather than crash.
        AccountPersistenceError::DuplicateEmail => Error::internal("identity store fault"),
    }
}

#[async_trait]
impl LoginService for LoginWorkflow {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccountProfile, Error> {
        let account = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::unknown_account(UNKNOWN_ACCOUNT_MESSAGE))?;

        if !account.authenticate(credentials.password().expose()) {
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS_MESSAGE));
        }

        info!(account_id = %account.id(), "account authenticated");
        Ok(account.profile())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for authentication semantics and error mapping.
    use std::sync::Mutex;

    use super::*;
    use crate::domain::account::{Account, DisplayName, EmailAddress};
    use crate::domain::error::ErrorCode;
    use rstest::rstest;

    #[derive(Clone, Copy)]
    enum StubFailure {
        Connection,
        Query,
    }

    impl StubFailure {
        fn to_error(self) -> AccountPersistenceError {
            match self {
                Self::Connection => AccountPersistenceError::connection("store unavailable"),
                Self::Query => AccountPersistenceError::query("store query failed"),
            }
        }
    }

    #[derive(Default)]
    struct StubAccountRepository {
        stored: Mutex<Vec<Account>>,
        find_failure: Mutex<Option<StubFailure>>,
    }

    impl StubAccountRepository {
        fn with_account(account: Account) -> Self {
            Self {
                stored: Mutex::new(vec![account]),
                find_failure: Mutex::new(None),
            }
        }

        fn set_find_failure(&self, failure: StubFailure) {
            *self.find_failure.lock().expect("failure lock") = Some(failure);
        }
    }

    #[async_trait]
    impl AccountRepository for StubAccountRepository {
        async fn find_by_email(
            &self,
            email: &EmailAddress,
        ) -> Result<Option<Account>, AccountPersistenceError> {
            if let Some(failure) = *self.find_failure.lock().expect("failure lock") {
                return Err(failure.to_error());
            }
            Ok(self
                .stored
                .lock()
                .expect("store lock")
                .iter()
                .find(|account| account.email() == email)
                .cloned())
        }

        async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
            self.stored.lock().expect("store lock").push(account.clone());
            Ok(())
        }
    }

    fn registered_account() -> Account {
        Account::register(
            EmailAddress::new("a@x.com").expect("valid email"),
            DisplayName::new("A").expect("valid name"),
            "pw1",
        )
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(email, password).expect("valid test credentials")
    }

    #[tokio::test]
    async fn authenticate_returns_profile_for_matching_credentials() {
        let account = registered_account();
        let expected_id = *account.id().as_uuid();
        let repository = Arc::new(StubAccountRepository::with_account(account));
        let workflow = LoginWorkflow::new(repository);

        let profile = workflow
            .authenticate(&credentials("a@x.com", "pw1"))
            .await
            .expect("matching credentials should authenticate");

        assert_eq!(profile.id, expected_id);
        assert_eq!(profile.name.as_ref(), "A");
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_email_distinctly() {
        let repository = Arc::new(StubAccountRepository::default());
        let workflow = LoginWorkflow::new(repository);

        let err = workflow
            .authenticate(&credentials("missing@x.com", "pw1"))
            .await
            .expect_err("unknown account must fail");

        assert_eq!(err.code(), ErrorCode::UnknownAccount);
        assert_eq!(err.message(), UNKNOWN_ACCOUNT_MESSAGE);
    }

    #[rstest]
    #[case("pw2")]
    #[case("PW1")]
    #[case(" pw1")]
    #[tokio::test]
    async fn authenticate_rejects_wrong_password_distinctly(#[case] wrong: &str) {
        let repository = Arc::new(StubAccountRepository::with_account(registered_account()));
        let workflow = LoginWorkflow::new(repository);

        let err = workflow
            .authenticate(&credentials("a@x.com", wrong))
            .await
            .expect_err("wrong password must fail");

        assert_eq!(err.code(), ErrorCode::InvalidCredentials);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let repository = Arc::new(StubAccountRepository::with_account(registered_account()));
        let workflow = LoginWorkflow::new(repository);

        let err = workflow
            .authenticate(&credentials("A@X.COM", "pw1"))
            .await
            .expect_err("case-different email must not match");

        assert_eq!(err.code(), ErrorCode::UnknownAccount);
    }

    #[rstest]
    #[case(StubFailure::Connection, ErrorCode::ServiceUnavailable)]
    #[case(StubFailure::Query, ErrorCode::InternalError)]
    #[tokio::test]
    async fn authenticate_maps_find_errors(
        #[case] failure: StubFailure,
        #[case] expected_code: ErrorCode,
    ) {
        let repository = Arc::new(StubAccountRepository::default());
        repository.set_find_failure(failure);
        let workflow = LoginWorkflow::new(repository);

        let err = workflow
            .authenticate(&credentials("a@x.com", "pw1"))
            .await
            .expect_err("find failures should surface as domain errors");

        assert_eq!(err.code(), expected_code);
    }
}
