//! Domain primitives, workflows, and ports.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, the credential codec, and the registration, login,
//! and wall workflows. Keep types immutable and document invariants and
//! serialisation contracts in each type's Rustdoc.

pub mod account;
pub mod auth;
pub mod credential;
pub mod error;
pub mod login;
pub mod ports;
pub mod registration;
pub mod trace_id;
pub mod wall;
pub mod wall_service;

pub use self::account::{
    Account, AccountId, AccountProfile, AccountValidationError, DisplayName, EmailAddress,
};
pub use self::auth::{Credentials, CredentialsValidationError, Password};
pub use self::credential::{Digest, Salt};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login::{INVALID_CREDENTIALS_MESSAGE, LoginWorkflow, UNKNOWN_ACCOUNT_MESSAGE};
pub use self::registration::{DUPLICATE_EMAIL_MESSAGE, RegistrationWorkflow};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::wall::{
    AuthoredWallPost, Message, NewWallPost, WallPostAuthor, WallPostView, WallValidationError,
};
pub use self::wall_service::WallWorkflow;

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
