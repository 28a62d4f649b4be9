//! # Source Connectors Library
//!
//! Connectors for third-party REST APIs (Klaviyo, Pinterest, Railz) that
//! validate their configuration, authenticate, check connectivity and list
//! the streams they expose.
//!
//! Modules:
//! - `auth`: authenticators, including the cached short-lived bearer token
//! - `connectors`: connector implementations and factory
//! - `config`: YAML configuration, defaults and validation
//! - `observability`: prometheus metrics

pub mod auth;
pub mod config;
pub mod connectors;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::auth::short_lived::{ShortLivedTokenAuthenticator, ShortLivedTokenSettings};
pub use crate::config::connectors::ServiceConfig;
pub use crate::error::{AuthFetchError, ConfigError, ConnectorError, HttpError};
