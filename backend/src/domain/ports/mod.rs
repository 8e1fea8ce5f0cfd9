//! Domain ports: traits decoupling workflows from infrastructure.
//!
//! Driven ports ([`AccountRepository`], [`WallRepository`]) are implemented by
//! outbound adapters. Driving ports ([`RegistrationService`], [`LoginService`],
//! [`WallService`]) are implemented by the domain workflows and consumed by
//! inbound adapters.

mod account_repository;
mod login_service;
pub(crate) mod macros;
mod registration_service;
mod wall_repository;
mod wall_service;

pub use account_repository::{AccountPersistenceError, AccountRepository};
pub use login_service::LoginService;
pub use registration_service::{RegistrationRequest, RegistrationService};
pub use wall_repository::{WallPersistenceError, WallRepository};
pub use wall_service::WallService;
