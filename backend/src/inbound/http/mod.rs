//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod wallposts;

pub use state::HttpState;

pub use crate::domain::ApiResult;
