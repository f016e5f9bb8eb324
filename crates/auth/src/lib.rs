//! # sforce-auth
//!
//! SOAP username/password login for the sforce client.
//!
//! The partner SOAP interface is used instead of the OAuth token endpoint
//! because it accepts a placeholder client identifier, which keeps the
//! default zero-configuration flow working. The flow consumes a username,
//! password, and optional security token, and delivers the session state
//! (bearer token, instance URL, user identity) that the transport stamps
//! onto every subsequent request.
//!
//! ## Security
//!
//! - Passwords and security tokens are redacted in `Debug` output
//! - Tracing skips credential parameters
//!
//! ## Example
//!
//! ```rust,ignore
//! use sforce_auth::{login_password, PasswordCredentials};
//!
//! let http = reqwest::Client::new();
//! let credentials = PasswordCredentials::new("jo@example.com", "hunter2", "TOKEN");
//! let session = login_password(
//!     &http,
//!     sforce_client::PRODUCTION_LOGIN_URL,
//!     sforce_client::DEFAULT_API_VERSION,
//!     "my-client-id",
//!     &credentials,
//! )
//! .await?;
//! ```

mod login;
mod xml;

pub use login::{login_password, PasswordCredentials};

// The login flow produces the session consumed by the transport.
pub use sforce_client::{Session, UserInfo};
