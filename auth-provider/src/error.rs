//! Client error types

use crate::ApiCallDiagnostics;
use thiserror::Error;

/// Substring that marks an upstream timeout in transport error text.
///
/// The upstream spells it this way; it is matched verbatim (case-insensitive).
/// Fragile: any change to the upstream wording silently turns timeouts into
/// plain transport errors.
pub const TIMEOUT_MARKER: &str = "excedeed";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connection failure
    #[error("transport error: {message}")]
    Transport {
        message: String,
        api_call: Box<ApiCallDiagnostics>,
    },

    /// Request timed out
    #[error("timeout")]
    Timeout { api_call: Box<ApiCallDiagnostics> },

    /// Response body does not match the expected envelope
    #[error("invalid response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        api_call: Box<ApiCallDiagnostics>,
    },

    /// Well-formed response with a non-OK status
    #[error("{code}")]
    Api {
        /// `error_code` reported by the service
        code: String,
        trx_id: String,
        message: String,
        api_call: Box<ApiCallDiagnostics>,
    },

    /// Token verified as not valid
    #[error("invalid token")]
    InvalidToken,

    /// The first inactive role met before a match
    #[error("role inactive")]
    RoleInactive,

    /// The matching permission is inactive
    #[error("permission inactive")]
    PermissionInactive,

    /// No active role grants the permission
    #[error("your role don't have access to this menu")]
    RoleForbidden,

    /// Invalid configuration or transport construction failure
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Classify a transport failure.
    ///
    /// `Timeout` when the lowercased text contains [`TIMEOUT_MARKER`],
    /// `Transport` otherwise.
    pub fn from_transport(message: impl Into<String>, api_call: ApiCallDiagnostics) -> Self {
        let message = message.into();
        let api_call = Box::new(api_call);
        if message.to_lowercase().contains(TIMEOUT_MARKER) {
            Self::Timeout { api_call }
        } else {
            Self::Transport { message, api_call }
        }
    }

    /// Diagnostics of the failed call, for errors raised by a call
    pub fn api_call(&self) -> Option<&ApiCallDiagnostics> {
        match self {
            Self::Transport { api_call, .. }
            | Self::Timeout { api_call }
            | Self::Decode { api_call, .. }
            | Self::Api { api_call, .. } => Some(&**api_call),
            _ => None,
        }
    }

    /// Whether this is a permission-check outcome rather than a call failure
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidToken | Self::RoleInactive | Self::PermissionInactive | Self::RoleForbidden
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
