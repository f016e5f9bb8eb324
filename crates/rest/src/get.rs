//! Single-record retrieval.

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use sforce_client::{ApiRequest, Result, Transport};

use crate::api::Api;
use crate::sobject::SObject;

/// Options accepted by [`Api::get`].
#[derive(Debug, Clone)]
pub enum GetOption {
    /// Attach a cancellation token to the request.
    Cancellation(CancellationToken),
}

impl GetOption {
    fn apply(self, request: &mut GetRequest) -> Result<()> {
        match self {
            GetOption::Cancellation(token) => request.cancellation = Some(token),
        }
        Ok(())
    }
}

/// Config for a single-record retrieval.
#[derive(Debug)]
struct GetRequest {
    object: String,
    id: String,
    cancellation: Option<CancellationToken>,
}

impl GetRequest {
    fn new(object: &str, id: &str) -> Self {
        Self {
            object: object.to_string(),
            id: id.to_string(),
            cancellation: None,
        }
    }

    fn render(&self) -> ApiRequest {
        let mut request = ApiRequest::get(format!("/sobjects/{}/{}", self.object, self.id));
        if let Some(token) = &self.cancellation {
            request = request.with_cancellation(token.clone());
        }
        request
    }
}

impl<T: Transport> Api<T> {
    /// Retrieve one record by object name and ID.
    #[instrument(skip(self, options))]
    pub async fn get(
        &self,
        object: &str,
        id: &str,
        options: impl IntoIterator<Item = GetOption>,
    ) -> Result<SObject> {
        let mut request = GetRequest::new(object, id);
        for option in options {
            option.apply(&mut request)?;
        }

        let mut response = self.execute(request.render()).await?;
        let body = response.take_body();
        let record = serde_json::from_slice(&body)?;
        Ok(record)
    }
}
