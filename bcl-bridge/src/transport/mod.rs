//! HTTP execution layer.
//!
//! [`HttpExecutor`] performs one [`RequestDescriptor`] against the BCL API and returns
//! the parsed JSON response. [`HttpTransport`] is the reqwest-backed implementation;
//! tests and embedders can supply their own.
//!
//! # Response handling
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx, JSON body | the parsed body |
//! | 2xx, empty body | `{}` |
//! | 2xx, non-JSON body | the body as a JSON string |
//! | non-2xx | [`BridgeError::Api`](crate::error::BridgeError::Api) with status and JSON body |
//! | no response | [`BridgeError::HttpError`](crate::error::BridgeError::HttpError) |
//!
//! # Examples
//!
//! ```rust,no_run
//! use bcl_bridge::{
//!     credentials::Credentials,
//!     request::RequestDescriptor,
//!     transport::{HttpExecutor, HttpTransport},
//! };
//!
//! # async fn example() -> bcl_bridge::error::Result<()> {
//! let transport = HttpTransport::new()?;
//! let credentials = Credentials::with_default_base_url("my-token");
//!
//! let forms = transport.execute(&RequestDescriptor::get("/forms"), &credentials).await?;
//! println!("{forms}");
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use serde_json::Value;

use crate::{credentials::Credentials, error::Result, request::RequestDescriptor};

pub mod http;

pub use http::HttpTransport;

/// Executes request descriptors against the BCL API.
pub trait HttpExecutor: Send + Sync {
    /// Performs one request.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Api`](crate::error::BridgeError::Api) for non-2xx
    /// responses, [`BridgeError::HttpError`](crate::error::BridgeError::HttpError) when
    /// no response was received and
    /// [`BridgeError::Transport`](crate::error::BridgeError::Transport) when the request
    /// was refused before sending.
    fn execute<'a>(
        &'a self,
        request: &'a RequestDescriptor,
        credentials: &'a Credentials,
    ) -> impl Future<Output = Result<Value>> + Send + 'a;
}

impl<T: HttpExecutor> HttpExecutor for &T {
    fn execute<'a>(
        &'a self,
        request: &'a RequestDescriptor,
        credentials: &'a Credentials,
    ) -> impl Future<Output = Result<Value>> + Send + 'a {
        (**self).execute(request, credentials)
    }
}

/// Interprets a success body.
pub(crate) fn parse_success_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Interprets an error body; `None` unless it is JSON.
pub(crate) fn parse_error_body(bytes: &[u8]) -> Option<Value> {
    serde_json::from_slice(bytes).ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_body_json() {
        assert_eq!(parse_success_body(br#"{"data":[1,2]}"#), json!({"data": [1, 2]}));
        assert_eq!(parse_success_body(b"[]"), json!([]));
    }

    #[test]
    fn test_success_body_empty() {
        assert_eq!(parse_success_body(b""), json!({}));
        assert_eq!(parse_success_body(b"  \n"), json!({}));
    }

    #[test]
    fn test_success_body_text() {
        assert_eq!(parse_success_body(b"OK"), json!("OK"));
    }

    #[test]
    fn test_error_body() {
        assert_eq!(parse_error_body(br#"{"message":"nope"}"#), Some(json!({"message": "nope"})));
        assert_eq!(parse_error_body(b"<html>502</html>"), None);
        assert_eq!(parse_error_body(b""), None);
    }
}
