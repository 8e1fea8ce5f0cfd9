//! Happywall backend library.
//!
//! A small social wall: accounts register with a salted, digested password,
//! log in, and post messages everyone can read, newest first. The crate is
//! laid out hexagonally: domain types and workflows in [`domain`], the REST
//! surface in [`inbound`], PostgreSQL and in-memory stores in [`outbound`],
//! and server wiring in [`server`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
