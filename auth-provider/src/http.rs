//! HTTP client for the auth service

use crate::api::{self, AuthApi};
use crate::diagnostics::{
    ApiCallDiagnostics, CallResult, CreateUserResponse, CurrentUserResponse, DeleteUserResponse,
    RolesResponse, UpdateUserResponse, UserResponse, UsersResponse, VerifyTokenResponse,
};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::{DeserializeOwned, Unexpected};
use shared::request::UsersQuery;
use shared::{ApiResponse, CreateUserRequest, UpdateUserRequest};
use std::error::Error as _;
use std::time::Instant;
use tracing::{debug, warn};

/// HTTP client for the auth service
///
/// Cheap to clone; clones share the connection pool. Holds no per-call
/// state, so one instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform one call and decode its envelope.
    ///
    /// `attach` adds the body or query to the prepared request.
    async fn call<T>(
        &self,
        method: Method,
        path: &str,
        token: &str,
        attach: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> ClientResult<CallResult<T>>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut api_call = ApiCallDiagnostics::new(method.as_str(), &url);

        let builder = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json");

        let request = match attach(builder).build() {
            Ok(request) => request,
            Err(e) => {
                warn!(method = %api_call.method, url = %url, error = %e, "Failed to build auth request");
                return Err(transport_error(&e, api_call));
            }
        };
        api_call.capture_request(&request);

        debug!(method = %api_call.method, url = %api_call.request_url, "Sending auth request");
        let started = Instant::now();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                api_call.latency = started.elapsed();
                warn!(
                    method = %api_call.method,
                    url = %api_call.request_url,
                    latency_ms = api_call.latency.as_millis() as u64,
                    error = %e,
                    "Auth request failed"
                );
                return Err(transport_error(&e, api_call));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                api_call.latency = started.elapsed();
                api_call.capture_response(status.as_u16(), &headers, &[]);
                warn!(url = %api_call.request_url, status = status.as_u16(), error = %e, "Failed to read auth response");
                return Err(transport_error(&e, api_call));
            }
        };
        api_call.latency = started.elapsed();
        api_call.capture_response(status.as_u16(), &headers, &body);

        debug!(
            method = %api_call.method,
            url = %api_call.request_url,
            status = status.as_u16(),
            latency_ms = api_call.latency.as_millis() as u64,
            "Auth response received"
        );

        let response: ApiResponse<T> = match decode_envelope(&body) {
            Ok(response) => response,
            Err(source) => {
                warn!(url = %api_call.request_url, status = status.as_u16(), error = %source, "Undecodable auth response");
                return Err(ClientError::Decode {
                    source,
                    api_call: Box::new(api_call),
                });
            }
        };

        if !response.is_ok() {
            warn!(
                url = %api_call.request_url,
                status = %response.status,
                error_code = %response.error_code,
                trx_id = %response.trx_id,
                "Auth service returned an error"
            );
            return Err(ClientError::Api {
                code: response.error_code,
                trx_id: response.trx_id,
                message: response.message,
                api_call: Box::new(api_call),
            });
        }

        Ok(CallResult::new(response, api_call))
    }
}

/// Decode a response body as an envelope; only a JSON object is accepted
fn decode_envelope<T>(body: &[u8]) -> Result<ApiResponse<T>, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        let unexpected = match &value {
            serde_json::Value::Array(_) => Unexpected::Seq,
            _ => Unexpected::Other("non-object value"),
        };
        return Err(serde::de::Error::invalid_type(unexpected, &"a response envelope object"));
    }
    serde_json::from_value(value)
}

/// Classify a reqwest failure using its full source chain as the message
fn transport_error(err: &reqwest::Error, api_call: ApiCallDiagnostics) -> ClientError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ClientError::from_transport(message, api_call)
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn verify_token(&self, token: &str) -> ClientResult<VerifyTokenResponse> {
        self.call(Method::POST, api::VERIFY_TOKEN_PATH, token, |req| req)
            .await
    }

    async fn get_current_user(&self, token: &str) -> ClientResult<CurrentUserResponse> {
        self.call(Method::GET, api::CURRENT_USER_PATH, token, |req| req)
            .await
    }

    async fn get_roles(&self, token: &str) -> ClientResult<RolesResponse> {
        self.call(Method::GET, api::ROLES_PATH, token, |req| req).await
    }

    async fn create_user(
        &self,
        token: &str,
        request: &CreateUserRequest,
    ) -> ClientResult<CreateUserResponse> {
        self.call(Method::POST, api::USERS_PATH, token, |req| req.json(request))
            .await
    }

    async fn update_user(
        &self,
        token: &str,
        id: &str,
        request: &UpdateUserRequest,
    ) -> ClientResult<UpdateUserResponse> {
        self.call(Method::PUT, &api::user_path(id), token, |req| {
            req.json(request)
        })
        .await
    }

    async fn delete_user(&self, token: &str, id: &str) -> ClientResult<DeleteUserResponse> {
        self.call(Method::DELETE, &api::user_path(id), token, |req| req)
            .await
    }

    async fn get_users(&self, token: &str, query: &UsersQuery) -> ClientResult<UsersResponse> {
        self.call(Method::GET, api::USERS_PATH, token, |req| req.query(query))
            .await
    }

    async fn get_user(&self, token: &str, id: &str) -> ClientResult<UserResponse> {
        self.call(Method::GET, &api::user_path(id), token, |req| req)
            .await
    }
}
