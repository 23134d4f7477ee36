//! Error types for the BCL bridge.
//!
//! All errors implement [`std::error::Error`] via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Precondition errors** ([`BridgeError::Validation`],
//!   [`BridgeError::InvalidParameters`], [`BridgeError::UnsupportedOperation`]): detected
//!   locally, before any network call
//! - **Transport errors** ([`BridgeError::Api`], [`BridgeError::HttpError`],
//!   [`BridgeError::Transport`]): the request failed on the wire or the API answered with a
//!   non-success status
//! - **Host abort** ([`BridgeError::BatchAborted`]): a batch stopped at its first failing
//!   item because failure tolerance was off
//!
//! Every variant is reduced to a single human-readable message by
//! [`classify`](crate::classify::classify).
//!
//! # Examples
//!
//! ```
//! use bcl_bridge::error::{BridgeError, Result};
//!
//! fn require_items(items: &[u32]) -> Result<()> {
//!     if items.is_empty() {
//!         return Err(BridgeError::Validation(
//!             "At least one stock item must be provided".to_owned(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_items(&[]).is_err());
//! ```

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while dispatching or executing BCL operations.
///
/// This type implements `#[must_use]` to ensure errors are not silently ignored.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A request precondition failed.
    ///
    /// Raised by the dispatcher before any HTTP call, e.g. a stock update without stock
    /// items or a coupon update without fields.
    #[error("{0}")]
    Validation(String),

    /// The parameter bag of an item could not be decoded for the selected operation.
    ///
    /// # Recovery
    ///
    /// Check that every required parameter is present and has the expected JSON type.
    #[error("Invalid parameters for {operation}: {reason}")]
    InvalidParameters {
        /// Operation whose parameters were rejected (`resource.operation`).
        operation: String,
        /// Decoder message.
        reason: String,
    },

    /// The resource/operation pair is not part of the dispatch table.
    #[error("The operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation {
        /// Requested resource.
        resource: String,
        /// Requested operation.
        operation: String,
    },

    /// The API answered with a non-success HTTP status.
    ///
    /// `body` holds the response payload when it was valid JSON.
    #[error("Request failed with status code {status}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Parsed response body, if any.
        body: Option<serde_json::Value>,
    },

    /// HTTP request failed without a usable response.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, refused connections, DNS and TLS failures.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The executor refused to send a request (bad URL, path or header).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A batch stopped at its first failing item.
    ///
    /// Carries the classified message of the failure and the records of the items that
    /// completed before it.
    #[error("BCL API Error [{status_code}]: {message}")]
    BatchAborted {
        /// Zero-based index of the failing item.
        item_index: usize,
        /// Classified status code.
        status_code: u16,
        /// Classified message.
        message: String,
        /// Records of the items before `item_index`.
        completed: Vec<crate::batch::ResultRecord>,
    },
}

impl BridgeError {
    /// Returns the HTTP status carried by this error, if the API produced one.
    ///
    /// Only [`BridgeError::Api`] has one: the transport reads non-2xx responses itself, so a
    /// wrapped `reqwest::Error` always means no response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error was detected before any network call.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidParameters { .. } | Self::UnsupportedOperation { .. }
        )
    }
}
