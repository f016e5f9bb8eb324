//! # sforce
//!
//! A typed Salesforce API client.
//!
//! The workspace splits along the request/execution boundary:
//!
//! - [`sforce_client`] - transport contracts: requests, responses, sessions,
//!   errors
//! - [`sforce_auth`] - SOAP username/password login
//! - [`sforce_rest`] - the request builders (get, select, raw query, search)
//! - this crate - the top-level [`Client`] tying them together: it owns the
//!   HTTP stack and session state, implements the transport, and exposes the
//!   API facade
//!
//! ## Example
//!
//! ```rust,ignore
//! use sforce::{Client, SelectOption};
//!
//! #[tokio::main]
//! async fn main() -> sforce::Result<()> {
//!     let client = Client::builder()
//!         .api_version("54.0")
//!         .build()?;
//!
//!     client
//!         .login_password("jo@example.com", "hunter2", "SECURITYTOKEN")
//!         .await?;
//!
//!     let accounts = client
//!         .select("Account", [SelectOption::Limit(10)])
//!         .await?;
//!
//!     for record in &accounts.records {
//!         println!("{}: {}", record.id(), record.string_field("Name"));
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;

pub use client::{Client, ClientBuilder, SessionTransport};

pub use sforce_auth::PasswordCredentials;
pub use sforce_client::{
    ApiRequest, Error, ErrorKind, RequestMethod, Response, Result, Session, Transport, UserInfo,
    DEFAULT_API_VERSION, PRODUCTION_LOGIN_URL, SANDBOX_LOGIN_URL,
};
pub use sforce_rest::{
    Api, GetOption, QueryResult, RawQueryOption, SObject, SObjectAttributes, SearchObject,
    SearchOption, SearchResults, SelectOption,
};

/// Default client identifier sent in the login call options.
pub const DEFAULT_CLIENT_ID: &str = "sforce";
