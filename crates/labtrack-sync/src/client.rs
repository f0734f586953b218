//! Backend client: response envelope, wire types, and transports.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Sync errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Session expired or invalid")]
    Unauthorized,

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The backend's uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Unwrap an envelope: a failed envelope becomes [`ApiError::Rejected`],
/// a successful one without data is also a rejection.
///
/// Tolerates noise around the envelope (proxy banners, trailing newlines) by
/// slicing from the first `{` to the last `}` before parsing.
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let start = body
        .find('{')
        .ok_or_else(|| ApiError::Rejected("no JSON object in response".into()))?;
    let end = body
        .rfind('}')
        .ok_or_else(|| ApiError::Rejected("no JSON object in response".into()))?;

    let envelope: Envelope<T> = serde_json::from_str(&body[start..=end])?;
    if !envelope.success {
        return Err(ApiError::Rejected(
            envelope.message.unwrap_or_else(|| "unknown error".into()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Rejected("success response without data".into()))
}

// =========================================================================
// Wire types
// =========================================================================

/// Staff login response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: serde_json::Value,
}

/// Patient OTP verification response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientLoginPayload {
    pub token: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    pub patient: serde_json::Value,
}

/// Status update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateBody {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

// =========================================================================
// Transport
// =========================================================================

/// A transport the sync layer can push requests through. The real HTTP
/// client and the in-memory mock both implement this.
pub trait Backend {
    /// GET a path, returning the raw envelope JSON.
    fn get(&self, path: &str, token: Option<&str>) -> ApiResult<String>;

    /// POST a JSON body to a path, returning the raw envelope JSON.
    fn post(&self, path: &str, token: Option<&str>, body: &str) -> ApiResult<String>;
}

/// Mock backend for testing without a server. Responses are registered per
/// path; unregistered paths act like an expired session.
#[derive(Debug, Default)]
pub struct MockBackend {
    responses: std::collections::HashMap<String, String>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned envelope for a path (used for both GET and POST).
    pub fn respond(&mut self, path: &str, envelope_json: &str) {
        self.responses.insert(path.to_string(), envelope_json.to_string());
    }
}

impl Backend for MockBackend {
    fn get(&self, path: &str, _token: Option<&str>) -> ApiResult<String> {
        self.responses
            .get(path)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    fn post(&self, path: &str, token: Option<&str>, _body: &str) -> ApiResult<String> {
        self.get(path, token)
    }
}

/// Blocking HTTP transport over the lab backend.
#[cfg(feature = "http")]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpBackend {
    /// Create a transport rooted at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> ApiResult<String> {
        let response = request
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    fn with_auth(
        &self,
        request: reqwest::blocking::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::blocking::RequestBuilder {
        match token {
            Some(token) => request.header(crate::endpoints::AUTH_HEADER, crate::endpoints::bearer(token)),
            None => request,
        }
    }
}

#[cfg(feature = "http")]
impl Backend for HttpBackend {
    fn get(&self, path: &str, token: Option<&str>) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.with_auth(self.client.get(url), token);
        self.send(request)
    }

    fn post(&self, path: &str, token: Option<&str>, body: &str) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .with_auth(self.client.post(url), token)
            .header("Content-Type", "application/json")
            .body(body.to_string());
        self.send(request)
    }
}

// =========================================================================
// Client
// =========================================================================

/// Typed client over any [`Backend`].
pub struct SyncClient<B: Backend> {
    backend: B,
    token: Option<String>,
}

impl<B: Backend> SyncClient<B> {
    /// Create an unauthenticated client.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            token: None,
        }
    }

    /// Current session token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in as staff, retaining the session token.
    pub fn staff_login(&mut self, email: &str, password: &str) -> ApiResult<LoginPayload> {
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        let raw = self
            .backend
            .post(&crate::endpoints::staff_login(), None, &body)?;
        let payload: LoginPayload = parse_envelope(&raw)?;
        self.token = Some(payload.token.clone());
        Ok(payload)
    }

    /// Drop the session token.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// GET a typed payload from a path.
    pub fn fetch<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let raw = self.backend.get(path, self.token())?;
        parse_envelope(&raw)
    }

    /// POST a serializable body to a path, parsing the typed payload.
    pub fn push<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let body = serde_json::to_string(body)?;
        let raw = self.backend.post(path, self.token(), &body)?;
        parse_envelope(&raw)
    }

    /// Push a status change for a visit.
    pub fn push_status_update(
        &self,
        patient_id: &str,
        visit_id: &str,
        update: &StatusUpdateBody,
    ) -> ApiResult<serde_json::Value> {
        self.push(&crate::endpoints::visit_status(patient_id, visit_id), update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_envelope_success() {
        let json = r#"{"success":true,"data":{"token":"t1","user":{"role":"Admin"}}}"#;
        let payload: LoginPayload = parse_envelope(json).unwrap();
        assert_eq!(payload.token, "t1");
    }

    #[test]
    fn test_parse_envelope_failure_carries_message() {
        let json = r#"{"success":false,"message":"Invalid credentials"}"#;
        let err = parse_envelope::<LoginPayload>(json).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(m) if m == "Invalid credentials"));
    }

    #[test]
    fn test_parse_envelope_with_noise() {
        let body = "gateway ok\n{\"success\":true,\"data\":{\"token\":\"t\",\"user\":{}}}\n";
        let payload: LoginPayload = parse_envelope(body).unwrap();
        assert_eq!(payload.token, "t");
    }

    #[test]
    fn test_parse_envelope_success_without_data() {
        let json = r#"{"success":true}"#;
        assert!(matches!(
            parse_envelope::<LoginPayload>(json),
            Err(ApiError::Rejected(_))
        ));
    }

    #[test]
    fn test_login_retains_token() {
        let mut backend = MockBackend::new();
        backend.respond(
            &crate::endpoints::staff_login(),
            r#"{"success":true,"data":{"token":"session-1","user":{}}}"#,
        );

        let mut client = SyncClient::new(backend);
        client.staff_login("admin@lab.test", "pw").unwrap();
        assert_eq!(client.token(), Some("session-1"));

        client.logout();
        assert!(client.token().is_none());
    }

    #[test]
    fn test_unknown_path_reads_as_unauthorized() {
        let client = SyncClient::new(MockBackend::new());
        let err = client.fetch::<serde_json::Value>("/nowhere").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_status_update_body_omits_empty_remarks() {
        let body = StatusUpdateBody {
            status: "Collected".into(),
            remarks: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"status":"Collected"}"#);
    }
}
