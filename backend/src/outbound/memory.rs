//! In-memory repository adapters.
//!
//! Used when no database is configured (local development) and by the
//! integration tests. The account store enforces email uniqueness inside a
//! single lock, mirroring the store-level arbitration the PostgreSQL unique
//! index provides.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    AccountPersistenceError, AccountRepository, WallPersistenceError, WallRepository,
};
use crate::domain::{Account, AuthoredWallPost, EmailAddress, NewWallPost};

/// In-memory identity store with store-level uniqueness enforcement.
#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, email: &EmailAddress) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|account| account.email() == email)
            .cloned()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountPersistenceError> {
        Ok(self.find(email))
    }

    async fn insert(&self, account: &Account) -> Result<(), AccountPersistenceError> {
        // Check and insert under one lock: the store, not the caller's
        // pre-check, decides which concurrent registration wins.
        let mut accounts = self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if accounts.iter().any(|a| a.email() == account.email()) {
            return Err(AccountPersistenceError::duplicate_email());
        }
        accounts.push(account.clone());
        Ok(())
    }
}

struct StoredPost {
    post: NewWallPost,
    created_at: chrono::DateTime<Utc>,
}

/// In-memory feed store joining author names from a shared account store.
pub struct MemoryWallRepository {
    accounts: Arc<MemoryAccountRepository>,
    posts: Mutex<Vec<StoredPost>>,
}

impl MemoryWallRepository {
    /// Create an empty feed over the given account store.
    pub fn new(accounts: Arc<MemoryAccountRepository>) -> Self {
        Self {
            accounts,
            posts: Mutex::new(Vec::new()),
        }
    }

    fn author_name(&self, post: &NewWallPost) -> Option<crate::domain::DisplayName> {
        self.accounts
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|account| account.id() == post.author())
            .map(|account| account.display_name().clone())
    }
}

#[async_trait]
impl WallRepository for MemoryWallRepository {
    async fn append(&self, post: &NewWallPost) -> Result<(), WallPersistenceError> {
        self.posts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredPost {
                post: post.clone(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<AuthoredWallPost>, WallPersistenceError> {
        let posts = self.posts.lock().unwrap_or_else(PoisonError::into_inner);
        let mut listing: Vec<AuthoredWallPost> = posts
            .iter()
            .map(|stored| {
                let author_name = self.author_name(&stored.post).ok_or_else(|| {
                    WallPersistenceError::query("post references a missing account")
                })?;
                Ok(AuthoredWallPost {
                    id: *stored.post.id(),
                    message: stored.post.message().clone(),
                    author: *stored.post.author(),
                    author_name,
                    created_at: stored.created_at,
                })
            })
            .collect::<Result<_, WallPersistenceError>>()?;
        listing.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for store-level uniqueness arbitration.
    use super::*;
    use crate::domain::ports::{RegistrationRequest, RegistrationService};
    use crate::domain::{DisplayName, Message, Password, RegistrationWorkflow};

    fn account(email: &str, name: &str) -> Account {
        Account::register(
            EmailAddress::new(email).expect("valid email"),
            DisplayName::new(name).expect("valid name"),
            "pw1",
        )
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = MemoryAccountRepository::new();
        store
            .insert(&account("a@x.com", "A"))
            .await
            .expect("first insert succeeds");

        let err = store
            .insert(&account("a@x.com", "B"))
            .await
            .expect_err("second insert must fail");

        assert_eq!(err, AccountPersistenceError::duplicate_email());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_store_exactly_one_account() {
        // Both tasks pass the workflow's pre-check before either inserts; the
        // store's single-lock insert decides the winner.
        let store = Arc::new(MemoryAccountRepository::new());
        let workflow = RegistrationWorkflow::new(store.clone());

        let request = || RegistrationRequest {
            email: EmailAddress::new("race@x.com").expect("valid email"),
            display_name: DisplayName::new("Racer").expect("valid name"),
            password: Password::new("pw1").expect("valid password"),
        };

        let (first, second) = tokio::join!(workflow.register(request()), workflow.register(request()));

        let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
        let conflicts = [&first, &second]
            .iter()
            .filter(|r| {
                r.as_ref()
                    .err()
                    .is_some_and(|e| e.code() == crate::domain::ErrorCode::Conflict)
            })
            .count();

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn listing_is_newest_first_with_author_names() {
        let store = Arc::new(MemoryAccountRepository::new());
        let author = account("a@x.com", "Ada");
        let author_id = *author.id();
        store.insert(&author).await.expect("insert author");

        let wall = MemoryWallRepository::new(store);
        for text in ["first", "second"] {
            wall.append(&NewWallPost::new(
                Message::new(text).expect("valid message"),
                author_id,
            ))
            .await
            .expect("append post");
        }

        let listing = wall.list_recent().await.expect("listing succeeds");
        assert_eq!(listing.len(), 2);
        assert!(listing.first().expect("newest").created_at >= listing.get(1).expect("older").created_at);
        assert!(listing.iter().all(|post| post.author_name.as_ref() == "Ada"));
    }
}
