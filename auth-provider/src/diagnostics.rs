//! Per-call diagnostics
//!
//! Every outbound call records what was sent and what came back, whether
//! the call succeeded or not. Successful calls carry the record in
//! [`CallResult`]; failed calls carry it in the error
//! (see [`ClientError::api_call`](crate::ClientError::api_call)).

use reqwest::header::HeaderMap;
use serde::Serialize;
use shared::{ApiResponse, CurrentUser, Role, User, UsersPage, VerificationResult};
use std::collections::BTreeMap;
use std::time::Duration;

/// Captured metadata about one HTTP call
///
/// Fields the call never reached stay empty/zero (e.g. `status_code` is
/// `0` and `response_body` empty after a connection failure).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiCallDiagnostics {
    /// Target URL without the query string
    pub request_url: String,
    pub method: String,
    pub request_headers: BTreeMap<String, Vec<String>>,
    /// Raw query string, empty when the call has none
    pub request_query: String,
    pub request_body: String,
    pub response_headers: BTreeMap<String, Vec<String>>,
    pub response_body: String,
    pub status_code: u16,
    pub latency: Duration,
}

impl ApiCallDiagnostics {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            request_url: url.into(),
            method: method.into(),
            ..Default::default()
        }
    }

    /// Record the request exactly as it goes on the wire
    pub(crate) fn capture_request(&mut self, request: &reqwest::Request) {
        let mut url = request.url().clone();
        self.request_query = url.query().unwrap_or_default().to_string();
        url.set_query(None);
        self.request_url = url.to_string();
        self.method = request.method().to_string();
        self.request_headers = header_map(request.headers());
        self.request_body = request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default();
    }

    pub(crate) fn capture_response(&mut self, status_code: u16, headers: &HeaderMap, body: &[u8]) {
        self.status_code = status_code;
        self.response_headers = header_map(headers);
        self.response_body = String::from_utf8_lossy(body).into_owned();
    }

    /// First value of a request header, matched case-insensitively
    pub fn request_header(&self, name: &str) -> Option<&str> {
        first_header(&self.request_headers, name)
    }

    /// First value of a response header, matched case-insensitively
    pub fn response_header(&self, name: &str) -> Option<&str> {
        first_header(&self.response_headers, name)
    }
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

fn first_header<'a>(headers: &'a BTreeMap<String, Vec<String>>, name: &str) -> Option<&'a str> {
    // header_map stores lowercase names
    headers
        .get(&name.to_ascii_lowercase())
        .and_then(|values| values.first())
        .map(String::as_str)
}

/// Capability shared by every response type: access to the call diagnostics
pub trait ApiCallResult {
    fn api_call(&self) -> &ApiCallDiagnostics;
}

/// A decoded response envelope together with the diagnostics of its call
#[derive(Debug, Clone)]
pub struct CallResult<T> {
    pub response: ApiResponse<T>,
    pub api_call: ApiCallDiagnostics,
}

impl<T> CallResult<T> {
    pub fn new(response: ApiResponse<T>, api_call: ApiCallDiagnostics) -> Self {
        Self { response, api_call }
    }

    /// Response data
    pub fn data(&self) -> &T {
        &self.response.data
    }

    /// Take the response data, dropping the envelope and diagnostics
    pub fn into_data(self) -> T {
        self.response.data
    }

    pub fn trx_id(&self) -> &str {
        &self.response.trx_id
    }

    pub fn message(&self) -> &str {
        &self.response.message
    }
}

impl<T> ApiCallResult for CallResult<T> {
    fn api_call(&self) -> &ApiCallDiagnostics {
        &self.api_call
    }
}

/// verify-token response
pub type VerifyTokenResponse = CallResult<VerificationResult>;
/// current-user response
pub type CurrentUserResponse = CallResult<CurrentUser>;
/// role listing response (`data` is the array itself)
pub type RolesResponse = CallResult<Vec<Role>>;
/// create-user response
pub type CreateUserResponse = CallResult<User>;
/// update-user response
pub type UpdateUserResponse = CallResult<User>;
/// delete-user response; the service puts arbitrary JSON in `data`
pub type DeleteUserResponse = CallResult<serde_json::Value>;
/// user listing response
pub type UsersResponse = CallResult<UsersPage>;
/// single user response
pub type UserResponse = CallResult<User>;
