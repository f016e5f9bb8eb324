//! # sforce-rest
//!
//! Request builders for the Salesforce REST API data endpoints.
//!
//! The [`Api`] facade aggregates one builder per operation:
//!
//! - **Get** - retrieve a single record by object name and ID
//! - **Select** - structured SOQL query assembled from options
//! - **RawQuery** - escape hatch for pre-built SOQL text
//! - **Search** - parameterized search POSTed as a JSON body
//!
//! Each builder collects positional arguments plus an ordered sequence of
//! option values, applies the options to a mutable request config
//! (fail-fast: the first validation failure aborts the call before any
//! I/O), renders the config into an [`ApiRequest`], hands it to the
//! [`Transport`], and decodes the response body into a typed result.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sforce_rest::{Api, SelectOption};
//!
//! let api = Api::new(transport);
//!
//! // All fields, newest first, ten rows
//! let result = api
//!     .select(
//!         "Account",
//!         [
//!             SelectOption::OrderBy("CreatedDate DESC".into()),
//!             SelectOption::Limit(10),
//!         ],
//!     )
//!     .await?;
//!
//! for record in &result.records {
//!     println!("{} {}", record.id(), record.string_field("Name"));
//! }
//! ```

mod api;
mod get;
mod raw_query;
mod search;
mod select;
mod sobject;
mod types;

#[cfg(test)]
mod testing;

pub use api::Api;
pub use get::GetOption;
pub use raw_query::RawQueryOption;
pub use search::{SearchObject, SearchOption};
pub use select::SelectOption;
pub use sobject::{SObject, SObjectAttributes};
pub use types::{QueryResult, SearchResults};

// Re-export the transport contracts users need alongside the builders.
pub use sforce_client::{ApiRequest, Error, ErrorKind, Response, Result, Transport};
