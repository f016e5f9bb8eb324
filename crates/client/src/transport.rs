//! The execution boundary between request builders and the network.

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::request::ApiRequest;
use crate::response::Response;

/// Executes a rendered request and returns the raw response.
///
/// This is the sole extension point for supplying authentication headers,
/// base-URL resolution, and the real network call. Production and test
/// implementations are both ordinary implementers; the request builders
/// depend only on this contract, never on a concrete HTTP stack.
pub trait Transport {
    /// Execute a single request.
    fn perform(&self, request: ApiRequest) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport + Send + Sync> Transport for Arc<T> {
    fn perform(&self, request: ApiRequest) -> impl Future<Output = Result<Response>> + Send {
        T::perform(self, request)
    }
}

impl<T: Transport + Sync> Transport for &T {
    fn perform(&self, request: ApiRequest) -> impl Future<Output = Result<Response>> + Send {
        T::perform(self, request)
    }
}
