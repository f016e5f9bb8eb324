//! # sforce-client
//!
//! Core transport contracts for the sforce Salesforce client.
//!
//! This crate defines the boundary between request construction and request
//! execution:
//! - [`ApiRequest`] - a rendered protocol-level request (method, path, body)
//! - [`Response`] - status, headers, and a single-use body
//! - [`Transport`] - the one-method execution contract implemented by the
//!   authenticated HTTP client (and by test doubles)
//! - [`Session`] - the bearer token and instance URL produced by the login
//!   flow and consumed by the transport
//! - [`Error`] - the shared error taxonomy, including the structured
//!   remote-error parser for non-success response bodies
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Request builders                       │
//! │        (sforce-rest: get, select, raw query, search)    │
//! └─────────────────────────────────────────────────────────┘
//!                             │ ApiRequest
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Transport::perform                     │
//! │  - implemented by the authenticated client (sforce)     │
//! │  - or by an in-memory stub in tests                     │
//! └─────────────────────────────────────────────────────────┘
//!                             │ Response
//!                             ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │               Typed decoding in the builder             │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod error;
mod request;
mod response;
mod session;
mod transport;

pub use error::{parse_api_error, Error, ErrorKind, Result};
pub use request::{ApiRequest, RequestMethod};
pub use response::Response;
pub use session::{Session, UserInfo};
pub use transport::Transport;

/// Default Salesforce API version.
pub const DEFAULT_API_VERSION: &str = "54.0";

/// Default Salesforce login URL for production.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default Salesforce login URL for sandbox orgs.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("sforce/", env!("CARGO_PKG_VERSION"));
