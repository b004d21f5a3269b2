//! API Response types
//!
//! Every auth service endpoint answers with the same envelope:
//! ```json
//! {
//!     "code": 200,
//!     "status": "OK",
//!     "error_code": "",
//!     "trx_id": "8f0c...",
//!     "data": { ... },
//!     "message": "User created"
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// `status` value of a successful response
pub const STATUS_OK: &str = "OK";

/// Unified API response envelope
///
/// Decoding is tolerant: missing fields and a `null` data payload take
/// their empty/zero value, so error responses without `data` still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct ApiResponse<T> {
    /// HTTP-like numeric code echoed by the service
    pub code: i32,
    /// `"OK"` on success, an upper-case status word otherwise
    pub status: String,
    /// Machine-readable error code, empty on success
    pub error_code: String,
    /// Transaction ID for tracing a call through the service
    pub trx_id: String,
    /// Response data
    #[serde(deserialize_with = "null_as_default")]
    pub data: T,
    /// Human-readable message (mutating endpoints only)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            status: STATUS_OK.to_string(),
            error_code: String::new(),
            trx_id: String::new(),
            data,
            message: String::new(),
        }
    }

    /// Whether the service reported success
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Add a transaction ID
    pub fn with_trx_id(mut self, trx_id: impl Into<String>) -> Self {
        self.trx_id = trx_id.into();
        self
    }

    /// Add a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<T: Default> ApiResponse<T> {
    /// Create an error response with an empty data payload
    pub fn error(
        code: i32,
        status: impl Into<String>,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            status: status.into(),
            error_code: error_code.into(),
            trx_id: String::new(),
            data: T::default(),
            message: message.into(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
