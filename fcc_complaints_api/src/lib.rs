//! Minimal async client for Socrata (SODA 2.0) open-data resource endpoints.

mod client;
mod errors;
mod query;
pub mod types;
mod user_agent;
pub use self::client::{BasicAuth, Client};
pub use self::errors::Error;
pub use self::query::SodaQuery;
