//! Parameterized search.

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use sforce_client::{ApiRequest, Error, ErrorKind, Result, Transport};

use crate::api::Api;
use crate::types::SearchResults;

/// Largest accepted value for the overall and per-type limits.
const MAX_SEARCH_LIMIT: u32 = 2000;

/// Per-object-type search specification.
#[derive(Debug, Clone, Serialize)]
pub struct SearchObject {
    /// Object type name, e.g. `Account`.
    pub name: String,
    /// Fields to return for this type, overriding the global projection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Result cap for this type, overriding the default per-type limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchObject {
    /// Spec for a type searched with the global projection and limits.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: None,
            limit: None,
        }
    }
}

/// Options accepted by [`Api::search`], applied in call order.
#[derive(Debug, Clone)]
pub enum SearchOption {
    /// Replace the global field projection list.
    Fields(Vec<String>),
    /// Replace the search scope; entries are joined into a comma-separated
    /// scope string.
    Scope(Vec<String>),
    /// Replace the list of per-object-type search specifications.
    Objects(Vec<SearchObject>),
    /// Cap the overall number of results. Accepted range is `[1, 2000]`.
    OverallLimit(u32),
    /// Default result cap per object type. Accepted range is `[1, 2000]`.
    DefaultLimit(u32),
    /// Attach a cancellation token to the request.
    Cancellation(CancellationToken),
}

impl SearchOption {
    fn apply(self, request: &mut SearchRequest) -> Result<()> {
        match self {
            SearchOption::Fields(fields) => request.fields = fields,
            SearchOption::Scope(fields) => request.scope = fields.join(","),
            SearchOption::Objects(objects) => request.sobjects = objects,
            SearchOption::OverallLimit(limit) => {
                request.overall_limit = Some(validate_limit(limit)?)
            }
            SearchOption::DefaultLimit(limit) => {
                request.default_limit = Some(validate_limit(limit)?)
            }
            SearchOption::Cancellation(token) => request.cancellation = Some(token),
        }
        Ok(())
    }
}

fn validate_limit(limit: u32) -> Result<u32> {
    if limit > MAX_SEARCH_LIMIT {
        return Err(Error::new(ErrorKind::Validation(
            "limit exceeds maximum of 2000".to_string(),
        )));
    }
    if limit == 0 {
        return Err(Error::new(ErrorKind::Validation(
            "limit must be greater than 0".to_string(),
        )));
    }
    Ok(limit)
}

/// Config for a parameterized search. Serialized wholesale as the POST body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    q: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sobjects: Vec<SearchObject>,
    #[serde(rename = "in")]
    scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    overall_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_limit: Option<u32>,
    #[serde(skip)]
    cancellation: Option<CancellationToken>,
}

impl SearchRequest {
    fn new(query: &str) -> Self {
        Self {
            q: query.to_string(),
            fields: Vec::new(),
            sobjects: Vec::new(),
            scope: "ALL".to_string(),
            overall_limit: Some(MAX_SEARCH_LIMIT),
            default_limit: Some(MAX_SEARCH_LIMIT),
            cancellation: None,
        }
    }

    fn render(&self) -> Result<ApiRequest> {
        let body = serde_json::to_string_pretty(self)?;
        let mut request = ApiRequest::post("/parameterizedSearch", body);
        if let Some(token) = &self.cancellation {
            request = request.with_cancellation(token.clone());
        }
        Ok(request)
    }
}

impl<T: Transport> Api<T> {
    /// Run a parameterized search across object types.
    ///
    /// Unlike the GET-based operations the whole request shape travels as a
    /// structured JSON body, so scope, projections, and per-type specs are
    /// expressed as data rather than query text.
    #[instrument(skip(self, options))]
    pub async fn search(
        &self,
        query: &str,
        options: impl IntoIterator<Item = SearchOption>,
    ) -> Result<SearchResults> {
        let mut request = SearchRequest::new(query);
        for option in options {
            option.apply(&mut request)?;
        }

        let mut response = self.execute(request.render()?).await?;
        let body = response.take_body();
        let results = serde_json::from_slice(&body)?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use serde_json::{json, Value};

    const EMPTY_RESULTS: &str = r#"{"searchRecords":[]}"#;

    async fn rendered_body(query: &str, options: Vec<SearchOption>) -> Value {
        let transport = StubTransport::replying(200, EMPTY_RESULTS);
        let api = Api::new(&transport);
        api.search(query, options).await.unwrap();
        let body = transport.last_request().unwrap().body.unwrap();
        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_search_defaults() {
        let body = rendered_body("Acme", vec![]).await;

        assert_eq!(
            body,
            json!({
                "q": "Acme",
                "in": "ALL",
                "overallLimit": 2000,
                "defaultLimit": 2000
            })
        );
    }

    #[tokio::test]
    async fn test_search_body_is_indented() {
        let transport = StubTransport::replying(200, EMPTY_RESULTS);
        let api = Api::new(&transport);

        api.search("Acme", []).await.unwrap();

        let body = transport.last_request().unwrap().body.unwrap();
        assert!(body.contains("\n  \"q\": \"Acme\""), "{body}");
    }

    #[tokio::test]
    async fn test_search_posts_to_fixed_endpoint() {
        let transport = StubTransport::replying(200, EMPTY_RESULTS);
        let api = Api::new(&transport);

        api.search("Acme", []).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/parameterizedSearch");
        assert_eq!(request.method, sforce_client::RequestMethod::Post);
    }

    #[tokio::test]
    async fn test_scope_and_projection_options() {
        let body = rendered_body(
            "Acme",
            vec![
                SearchOption::Scope(vec!["NAME".to_string(), "PHONE".to_string()]),
                SearchOption::Fields(vec!["Id".to_string(), "Name".to_string()]),
            ],
        )
        .await;

        assert_eq!(body["in"], "NAME,PHONE");
        assert_eq!(body["fields"], json!(["Id", "Name"]));
    }

    #[tokio::test]
    async fn test_object_specs_serialize_sparsely() {
        let body = rendered_body(
            "Acme",
            vec![SearchOption::Objects(vec![
                SearchObject {
                    name: "Account".to_string(),
                    fields: Some(vec!["Id".to_string(), "Name".to_string()]),
                    limit: Some(20),
                },
                SearchObject::named("Contact"),
            ])],
        )
        .await;

        assert_eq!(
            body["sobjects"],
            json!([
                {"name": "Account", "fields": ["Id", "Name"], "limit": 20},
                {"name": "Contact"}
            ])
        );
    }

    #[tokio::test]
    async fn test_limit_options_validate_range() {
        for option in [
            SearchOption::OverallLimit(0),
            SearchOption::OverallLimit(2001),
            SearchOption::DefaultLimit(0),
            SearchOption::DefaultLimit(2001),
        ] {
            let transport = StubTransport::replying(200, EMPTY_RESULTS);
            let api = Api::new(&transport);

            let err = api.search("Acme", [option]).await.unwrap_err();
            assert!(err.is_validation());
            assert_eq!(transport.calls(), 0);
        }

        // Boundary values pass
        let body = rendered_body(
            "Acme",
            vec![
                SearchOption::OverallLimit(1),
                SearchOption::DefaultLimit(2000),
            ],
        )
        .await;
        assert_eq!(body["overallLimit"], 1);
        assert_eq!(body["defaultLimit"], 2000);
    }

    #[tokio::test]
    async fn test_search_decodes_results() {
        let transport = StubTransport::replying(
            200,
            r#"{"searchRecords":[{"Id":"001xx","attributes":{"type":"Account","url":"/sobjects/Account/001xx"}}]}"#,
        );
        let api = Api::new(&transport);

        let results = api.search("Acme", []).await.unwrap();

        assert_eq!(results.search_records.len(), 1);
        assert_eq!(results.search_records[0].object_type(), "Account");
    }

    #[tokio::test]
    async fn test_search_decodes_error_status_body() {
        let transport = StubTransport::replying(
            500,
            r#"[{"errorCode":"UNKNOWN_EXCEPTION","message":"search failed","fields":[]}]"#,
        );
        let api = Api::new(&transport);

        let err = api.search("Acme", []).await.unwrap_err();

        match err.kind {
            ErrorKind::Api {
                status,
                error_code,
                message,
                ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(error_code, "UNKNOWN_EXCEPTION");
                assert_eq!(message, "search failed");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
