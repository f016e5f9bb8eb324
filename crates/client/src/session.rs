//! Authenticated session state.

/// Session state produced by the login flow and consumed by the transport.
///
/// The transport stamps the session onto every outgoing request; nothing in
/// the request-builder layer inspects or refreshes it. The session ID is
/// redacted in `Debug` output to keep it out of logs.
#[derive(Clone)]
pub struct Session {
    session_id: String,
    instance_url: String,
    user: UserInfo,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    /// Create a new session from its parts.
    pub fn new(
        session_id: impl Into<String>,
        instance_url: impl Into<String>,
        user: UserInfo,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            instance_url: instance_url.into(),
            user,
        }
    }

    /// The opaque bearer token sent in the Authorization header.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Scheme and host of the org instance all requests are sent to.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Basic identity of the authenticated user.
    pub fn user(&self) -> &UserInfo {
        &self.user
    }
}

/// Basic user identity fields returned by the login call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
}
