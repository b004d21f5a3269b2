//! Error codes reported by the auth service
//!
//! - [`ErrorCode`]: the `error_code` strings carried in response envelopes
//! - HTTP status mapping for each code

mod codes;
mod http;

pub use codes::ErrorCode;
