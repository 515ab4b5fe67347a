//! Client for the FCC consumer complaints open-data API.
//!
//! Wraps the `fcc_complaints_api` Socrata client with layered INI
//! configuration, credential resolution, and conversion of typed filter
//! values (timestamps, times of day, phone numbers) into the literal strings
//! the dataset expects.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;

pub use fcc_complaints_api;
pub use fcc_complaints_api::types::Record;
pub use fcc_complaints_api::SodaQuery;

pub use client::{Credentials, FccApi};
pub use config::{Config, ConfigError};
pub use error::FccError;
pub use filter::{
    format_filters, FilterFormatter, FilterRule, FilterSet, FilterValue, FormatError,
    FormattedFilters,
};
