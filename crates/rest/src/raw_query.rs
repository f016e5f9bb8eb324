//! Verbatim SOQL execution.

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use sforce_client::{ApiRequest, Result, Transport};

use crate::api::Api;
use crate::types::QueryResult;

/// Options accepted by [`Api::raw_query`].
#[derive(Debug, Clone)]
pub enum RawQueryOption {
    /// Attach a cancellation token to the request.
    Cancellation(CancellationToken),
}

impl RawQueryOption {
    fn apply(self, request: &mut RawQueryRequest) -> Result<()> {
        match self {
            RawQueryOption::Cancellation(token) => request.cancellation = Some(token),
        }
        Ok(())
    }
}

/// Config for a verbatim query.
#[derive(Debug)]
struct RawQueryRequest {
    query: String,
    cancellation: Option<CancellationToken>,
}

impl RawQueryRequest {
    fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            cancellation: None,
        }
    }

    fn render(&self) -> ApiRequest {
        let mut request = ApiRequest::get(format!(
            "/query?q={}",
            urlencoding::encode(&self.query)
        ));
        if let Some(token) = &self.cancellation {
            request = request.with_cancellation(token.clone());
        }
        request
    }
}

impl<T: Transport> Api<T> {
    /// Execute a pre-built SOQL statement verbatim.
    ///
    /// No assembly and no validation of the query text; this is the escape
    /// hatch for everything [`Api::select`]'s fixed clause grammar cannot
    /// express.
    #[instrument(skip(self, options))]
    pub async fn raw_query(
        &self,
        query: &str,
        options: impl IntoIterator<Item = RawQueryOption>,
    ) -> Result<QueryResult> {
        let mut request = RawQueryRequest::new(query);
        for option in options {
            option.apply(&mut request)?;
        }

        let mut response = self.execute(request.render()).await?;
        let body = response.take_body();
        let result = serde_json::from_slice(&body)?;
        Ok(result)
    }
}
