//! Structured SOQL query assembly.

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use sforce_client::{ApiRequest, Error, ErrorKind, Result, Transport};

use crate::api::Api;
use crate::types::QueryResult;

/// Wildcard sentinel selecting every field of the queried object.
const ALL_FIELDS: &str = "FIELDS(ALL)";

/// Options accepted by [`Api::select`], applied in call order.
#[derive(Debug, Clone)]
pub enum SelectOption {
    /// Replace the default wildcard field list wholesale.
    Fields(Vec<String>),
    /// Cap the number of result rows. Zero is rejected.
    Limit(u32),
    /// Raw ORDER BY clause, passed through unvalidated.
    OrderBy(String),
    /// Attach a cancellation token to the request.
    Cancellation(CancellationToken),
}

impl SelectOption {
    fn apply(self, request: &mut SelectRequest) -> Result<()> {
        match self {
            SelectOption::Fields(fields) => request.fields = fields,
            SelectOption::Limit(limit) => {
                if limit < 1 {
                    return Err(Error::new(ErrorKind::Validation(
                        "limit cannot be lower than 1".to_string(),
                    )));
                }
                request.limit = Some(limit);
            }
            SelectOption::OrderBy(clause) => request.order_by = Some(clause),
            SelectOption::Cancellation(token) => request.cancellation = Some(token),
        }
        Ok(())
    }
}

/// Config for a structured query.
#[derive(Debug)]
struct SelectRequest {
    object: String,
    fields: Vec<String>,
    limit: Option<u32>,
    order_by: Option<String>,
    cancellation: Option<CancellationToken>,
}

impl SelectRequest {
    fn new(object: &str) -> Self {
        Self {
            object: object.to_string(),
            fields: vec![ALL_FIELDS.to_string()],
            limit: None,
            order_by: None,
            cancellation: None,
        }
    }

    /// Assemble the query text. Clause order is fixed: ORDER BY before
    /// LIMIT, regardless of the order the options were supplied in.
    fn soql(&self) -> String {
        let mut query = format!("SELECT {} FROM {}", self.fields.join(","), self.object);
        if let Some(order_by) = &self.order_by {
            query.push_str(&format!(" ORDER BY {order_by}"));
        }
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }
        query
    }

    fn render(&self) -> ApiRequest {
        let mut request = ApiRequest::get(format!(
            "/query?q={}",
            urlencoding::encode(&self.soql())
        ));
        if let Some(token) = &self.cancellation {
            request = request.with_cancellation(token.clone());
        }
        request
    }
}

impl<T: Transport> Api<T> {
    /// Query an object with a structured SOQL statement assembled from the
    /// supplied options.
    ///
    /// With no options the query selects all fields and no limit. Use
    /// [`Api::raw_query`] when the fixed clause grammar is not enough.
    #[instrument(skip(self, options))]
    pub async fn select(
        &self,
        object: &str,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Result<QueryResult> {
        let mut request = SelectRequest::new(object);
        for option in options {
            option.apply(&mut request)?;
        }

        let mut response = self.execute(request.render()).await?;
        let body = response.take_body();
        let result = serde_json::from_slice(&body)?;
        Ok(result)
    }
}
