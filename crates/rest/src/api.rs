//! The API facade aggregating the four request builders.

use sforce_client::{parse_api_error, ApiRequest, Response, Result, Transport};

/// One handle over the data-API operations, constructed once per client.
///
/// Generic over the [`Transport`] so the real authenticated HTTP client and
/// in-memory test doubles plug in interchangeably. The operation methods
/// live next to their request configs: [`get`], [`select`], [`raw_query`]
/// and [`search`].
///
/// [`get`]: Api::get
/// [`select`]: Api::select
/// [`raw_query`]: Api::raw_query
/// [`search`]: Api::search
#[derive(Debug, Clone)]
pub struct Api<T> {
    transport: T,
}

impl<T: Transport> Api<T> {
    /// Create the facade over a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a rendered request and decode error-status bodies.
    ///
    /// Every builder funnels through here, so a non-success status is
    /// always parsed as a structured remote error instead of being fed to
    /// the success-path decoder.
    pub(crate) async fn execute(&self, request: ApiRequest) -> Result<Response> {
        let mut response = self.transport.perform(request).await?;
        if response.is_error() {
            let body = response.take_body();
            return Err(parse_api_error(response.status(), &body));
        }
        Ok(response)
    }
}
