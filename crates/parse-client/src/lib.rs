//! Async client for the hosted content parsing API used by the site's
//! document tools.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::ParseClient;
pub use config::ClientConfig;
pub use error::{ClientError, ErrorCode};
pub use types::{HealthStatus, ParseFailure, ParseOptions, ParseRequest, ParseResult, ParseSuccess};
