//! The SOAP username/password login flow.

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use sforce_client::{Error, ErrorKind, Result, Session, UserInfo};

use crate::xml::{escape, extract_element};

/// Username/password credentials for the SOAP login call.
///
/// The security token is required unless the org trusts the caller's IP
/// range; pass an empty string in that case. Password and token are
/// redacted in `Debug` output.
#[derive(Clone)]
pub struct PasswordCredentials {
    username: String,
    password: String,
    security_token: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("security_token", &"[REDACTED]")
            .finish()
    }
}

impl PasswordCredentials {
    /// Create credentials from their parts.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
        }
    }

    /// The login username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Sign in through the partner SOAP interface and return the session.
///
/// POSTs the login envelope to `{login_url}/services/Soap/u/{api_version}`.
/// A non-200 status has its body decoded as a SOAP fault (falling back to
/// the generic remote-error parser); a 200 yields the session ID, the
/// instance URL reduced to scheme and host, and the user identity fields.
#[instrument(skip(http, credentials), fields(username = %credentials.username))]
pub async fn login_password(
    http: &reqwest::Client,
    login_url: &str,
    api_version: &str,
    client_id: &str,
    credentials: &PasswordCredentials,
) -> Result<Session> {
    let envelope = login_envelope(client_id, credentials);
    let url = format!("{login_url}/services/Soap/u/{api_version}");

    let response = http
        .post(&url)
        .header(CONTENT_TYPE, "text/xml")
        .header("charset", "UTF-8")
        .header("SOAPAction", "login")
        .body(envelope)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status != 200 {
        return Err(login_failure(status, &body));
    }

    let session = session_from_response(&body)?;
    debug!(instance_url = %session.instance_url(), "login succeeded");
    Ok(session)
}

/// Render the partner-API login envelope.
///
/// The CallOptions header carries the configured client identifier; the
/// security token, when present, is appended to the password.
fn login_envelope(client_id: &str, credentials: &PasswordCredentials) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"
        xmlns:urn="urn:partner.soap.sforce.com">
    <env:Header>
        <urn:CallOptions>
            <urn:client>{client}</urn:client>
            <urn:defaultNamespace>sf</urn:defaultNamespace>
        </urn:CallOptions>
    </env:Header>
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}{token}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#,
        client = escape(client_id),
        username = escape(&credentials.username),
        password = escape(&credentials.password),
        token = escape(&credentials.security_token),
    )
}

/// Decode a failed login response.
fn login_failure(status: u16, body: &str) -> Error {
    match (
        extract_element(body, "faultcode"),
        extract_element(body, "faultstring"),
    ) {
        (Some(fault_code), Some(fault_string)) => Error::new(ErrorKind::Api {
            status,
            error_code: fault_code,
            message: fault_string,
            fields: Vec::new(),
        }),
        _ => sforce_client::parse_api_error(status, body.as_bytes()),
    }
}

/// Pull the session state out of a successful login response.
fn session_from_response(body: &str) -> Result<Session> {
    let session_id = extract_element(body, "sessionId")
        .ok_or_else(|| Error::new(ErrorKind::Xml("login response missing sessionId".into())))?;
    let server_url = extract_element(body, "serverUrl")
        .ok_or_else(|| Error::new(ErrorKind::Xml("login response missing serverUrl".into())))?;

    let user = UserInfo {
        id: extract_element(body, "userId").unwrap_or_default(),
        username: extract_element(body, "userName").unwrap_or_default(),
        full_name: extract_element(body, "userFullName").unwrap_or_default(),
        email: extract_element(body, "userEmail").unwrap_or_default(),
    };

    Ok(Session::new(session_id, instance_url(&server_url)?, user))
}

/// Reduce the SOAP endpoint URL to the `scheme://host[:port]` the REST
/// requests are sent to.
fn instance_url(server_url: &str) -> Result<String> {
    let parsed = url::Url::parse(server_url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| Error::new(ErrorKind::InvalidUrl(format!("no host in {server_url}"))))?;

    Ok(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOGIN_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <loginResponse>
      <result>
        <serverUrl>https://na1.example.com/services/Soap/u/54.0/00Dxx</serverUrl>
        <sessionId>00Dxx!session.token</sessionId>
        <userId>005xx000001Svc</userId>
        <userInfo>
          <userEmail>jo@example.com</userEmail>
          <userFullName>Jo Example</userFullName>
          <userName>jo@example.com</userName>
        </userInfo>
      </result>
    </loginResponse>
  </soapenv:Body>
</soapenv:Envelope>"#;

    const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
  <soapenv:Body>
    <soapenv:Fault>
      <faultcode>INVALID_LOGIN</faultcode>
      <faultstring>INVALID_LOGIN: Invalid username, password, security token; or user locked out.</faultstring>
    </soapenv:Fault>
  </soapenv:Body>
</soapenv:Envelope>"#;

    #[tokio::test]
    async fn test_login_extracts_session_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/Soap/u/54.0"))
            .and(header("SOAPAction", "login"))
            .and(body_string_contains("<n1:username>jo@example.com</n1:username>"))
            .and(body_string_contains("<n1:password>hunter2TOKEN</n1:password>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(LOGIN_RESPONSE))
            .mount(&server)
            .await;

        let credentials = PasswordCredentials::new("jo@example.com", "hunter2", "TOKEN");
        let session = login_password(
            &reqwest::Client::new(),
            &server.uri(),
            "54.0",
            "sforce",
            &credentials,
        )
        .await
        .unwrap();

        assert_eq!(session.session_id(), "00Dxx!session.token");
        assert_eq!(session.instance_url(), "https://na1.example.com");
        assert_eq!(session.user().id, "005xx000001Svc");
        assert_eq!(session.user().full_name, "Jo Example");
        assert_eq!(session.user().email, "jo@example.com");
    }

    #[tokio::test]
    async fn test_login_decodes_soap_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/Soap/u/54.0"))
            .respond_with(ResponseTemplate::new(500).set_body_string(FAULT_RESPONSE))
            .mount(&server)
            .await;

        let credentials = PasswordCredentials::new("jo@example.com", "wrong", "");
        let err = login_password(
            &reqwest::Client::new(),
            &server.uri(),
            "54.0",
            "sforce",
            &credentials,
        )
        .await
        .unwrap_err();

        match err.kind {
            ErrorKind::Api {
                status, error_code, ..
            } => {
                assert_eq!(status, 500);
                assert_eq!(error_code, "INVALID_LOGIN");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_envelope_escapes_credentials() {
        let credentials = PasswordCredentials::new("jo@example.com", "p<a&s>s", "T&K");
        let envelope = login_envelope("my<client>", &credentials);

        assert!(envelope.contains("<urn:client>my&lt;client&gt;</urn:client>"));
        assert!(envelope.contains("<n1:password>p&lt;a&amp;s&gt;sT&amp;K</n1:password>"));
        assert!(!envelope.contains("p<a&s>s"));
    }

    #[test]
    fn test_instance_url_keeps_port() {
        assert_eq!(
            instance_url("https://na1.example.com/services/Soap/u/54.0").unwrap(),
            "https://na1.example.com"
        );
        assert_eq!(
            instance_url("http://127.0.0.1:8089/services/Soap/u/54.0").unwrap(),
            "http://127.0.0.1:8089"
        );
        assert!(instance_url("not a url").is_err());
    }

    #[test]
    fn test_missing_session_id_is_an_error() {
        let err = session_from_response("<result><serverUrl>https://x</serverUrl></result>")
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let credentials = PasswordCredentials::new("jo@example.com", "hunter2", "TOKEN");
        let debug = format!("{credentials:?}");

        assert!(debug.contains("jo@example.com"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("TOKEN"));
    }
}
