//! The top-level client: configuration, session state, and the
//! authenticated transport.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, instrument, warn};

use sforce_auth::PasswordCredentials;
use sforce_client::{
    ApiRequest, Error, ErrorKind, Response, Result, Session, Transport, DEFAULT_API_VERSION,
    PRODUCTION_LOGIN_URL, USER_AGENT,
};
use sforce_rest::{
    Api, GetOption, QueryResult, RawQueryOption, SObject, SearchOption, SearchResults,
    SelectOption,
};

/// The main handle for talking to Salesforce.
///
/// Construct it with [`Client::builder`], sign in with
/// [`Client::login_password`], then issue requests either through the
/// delegating methods here or through [`Client::api`].
#[derive(Debug, Clone)]
pub struct Client {
    core: Arc<SessionTransport>,
    api: Api<Arc<SessionTransport>>,
}

impl Client {
    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Sign in using username, password, and security token.
    ///
    /// The token may be empty when the org trusts the caller's IP range.
    /// On success the session is stored on the transport; the credentials
    /// are kept for the auth-retry replay.
    #[instrument(skip(self, password, security_token))]
    pub async fn login_password(
        &self,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> Result<()> {
        let credentials = PasswordCredentials::new(username, password, security_token);
        self.core.login(&credentials).await?;
        *self
            .core
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(credentials);
        Ok(())
    }

    /// The current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.core
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Access the API facade directly.
    pub fn api(&self) -> &Api<Arc<SessionTransport>> {
        &self.api
    }

    /// Retrieve one record by object name and ID.
    pub async fn get(
        &self,
        object: &str,
        id: &str,
        options: impl IntoIterator<Item = GetOption>,
    ) -> Result<SObject> {
        self.api.get(object, id, options).await
    }

    /// Query an object with a structured SOQL statement.
    pub async fn select(
        &self,
        object: &str,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Result<QueryResult> {
        self.api.select(object, options).await
    }

    /// Execute a pre-built SOQL statement verbatim.
    pub async fn raw_query(
        &self,
        query: &str,
        options: impl IntoIterator<Item = RawQueryOption>,
    ) -> Result<QueryResult> {
        self.api.raw_query(query, options).await
    }

    /// Run a parameterized search across object types.
    pub async fn search(
        &self,
        query: &str,
        options: impl IntoIterator<Item = SearchOption>,
    ) -> Result<SearchResults> {
        self.api.search(query, options).await
    }
}

/// Builder for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_version: String,
    client_id: String,
    http: Option<reqwest::Client>,
    auth_retry: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Create a builder with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: PRODUCTION_LOGIN_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client_id: crate::DEFAULT_CLIENT_ID.to_string(),
            http: None,
            auth_retry: false,
        }
    }

    /// Set the login URL, e.g. for sandbox orgs.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        // A trailing "/" would produce "//" when paths are appended
        self.base_url = url.as_ref().trim_end_matches('/').to_string();
        self
    }

    /// Set the API version, e.g. `"54.0"`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the client identifier sent in the login call options.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Supply a custom HTTP client.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Re-authenticate and replay once when a request comes back 401.
    pub fn auth_retry(mut self) -> Self {
        self.auth_retry = true;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?,
        };

        let core = Arc::new(SessionTransport {
            http,
            base_url: self.base_url,
            api_version: self.api_version,
            client_id: self.client_id,
            auth_retry: self.auth_retry,
            session: RwLock::new(None),
            credentials: RwLock::new(None),
        });

        Ok(Client {
            api: Api::new(core.clone()),
            core,
        })
    }
}

/// The authenticated transport behind [`Client`].
///
/// Resolves every rendered request against the session's instance URL and
/// the configured API version, stamps the bearer token, and buffers the
/// response body. The request builders never see any of this; they only
/// depend on the [`Transport`] contract.
#[derive(Debug)]
pub struct SessionTransport {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    client_id: String,
    auth_retry: bool,
    session: RwLock<Option<Session>>,
    credentials: RwLock<Option<PasswordCredentials>>,
}

impl SessionTransport {
    /// Snapshot the session fields needed to stamp a request.
    fn session_parts(&self) -> Result<(String, String)> {
        let guard = self.session.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(session) => Ok((
                session.instance_url().to_string(),
                session.session_id().to_string(),
            )),
            None => Err(Error::new(ErrorKind::Auth(
                "not authenticated; call login_password first".to_string(),
            ))),
        }
    }

    /// Run the login flow and store the resulting session.
    pub(crate) async fn login(&self, credentials: &PasswordCredentials) -> Result<Session> {
        let session = sforce_auth::login_password(
            &self.http,
            &self.base_url,
            &self.api_version,
            &self.client_id,
            credentials,
        )
        .await?;

        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(session)
    }

    /// Execute one round trip.
    async fn dispatch(&self, request: ApiRequest) -> Result<Response> {
        let (instance_url, session_id) = self.session_parts()?;
        let url = format!(
            "{}/services/data/v{}{}",
            instance_url, self.api_version, request.path
        );
        debug!(method = ?request.method, path = %request.path, "dispatching request");

        let mut builder = self
            .http
            .request(request.method.to_reqwest(), &url)
            .header(AUTHORIZATION, format!("Bearer {session_id}"))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let send = builder.send();
        let response = match request.cancellation {
            Some(token) => tokio::select! {
                _ = token.cancelled() => return Err(Error::new(ErrorKind::Cancelled)),
                result = send => result?,
            },
            None => send.await?,
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Response::new(status, headers, body))
    }
}

impl Transport for SessionTransport {
    async fn perform(&self, request: ApiRequest) -> Result<Response> {
        let response = self.dispatch(request.clone()).await?;

        // A rejected session gets one re-login and replay when asked for.
        if response.status() == 401 && self.auth_retry {
            let credentials = self
                .credentials
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(credentials) = credentials {
                warn!("session rejected, re-authenticating");
                self.login(&credentials).await?;
                return self.dispatch(request).await;
            }
        }

        Ok(response)
    }
}
