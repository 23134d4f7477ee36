//! Failure classification.
//!
//! Reduces any [`BridgeError`] to a human-readable message and a status code. Known API
//! statuses get a fixed explanation, optionally followed by the API's own `message` or
//! validation `errors`. Failures without an HTTP response are reported with status 500.

use serde::Serialize;
use serde_json::Value;

use crate::error::BridgeError;

/// Status code reported for failures that never reached the API.
pub const LOCAL_FAILURE_STATUS: u16 = 500;

/// A failure reduced to message and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, or 500 when no response was received.
    pub status_code: u16,
}

/// Classifies a failure.
///
/// # Examples
///
/// ```
/// use bcl_bridge::{classify::classify, error::BridgeError};
/// use serde_json::json;
///
/// let error = BridgeError::Api { status: 404, body: Some(json!({"message": "Form not found"})) };
/// let classified = classify(&error);
/// assert_eq!(classified.status_code, 404);
/// assert_eq!(
///     classified.message,
///     "Not found: The requested resource does not exist. API says: Form not found"
/// );
/// ```
#[must_use]
pub fn classify(error: &BridgeError) -> ClassifiedError {
    match error {
        BridgeError::Api { status, body } => classify_status(*status, body.as_ref(), error),
        BridgeError::BatchAborted { status_code, message, .. } => {
            ClassifiedError { message: message.clone(), status_code: *status_code }
        }
        _ => local(error),
    }
}

fn local(error: &BridgeError) -> ClassifiedError {
    ClassifiedError { message: error.to_string(), status_code: LOCAL_FAILURE_STATUS }
}

fn classify_status(status: u16, body: Option<&Value>, error: &BridgeError) -> ClassifiedError {
    let Some(base) = status_message(status) else {
        return ClassifiedError { message: error.to_string(), status_code: status };
    };

    let mut message = base.to_owned();
    if status == 422
        && let Some(errors) = body.and_then(|b| field(b, "errors"))
    {
        message.push_str(" Details: ");
        message.push_str(&errors.to_string());
    } else if let Some(api_message) = body.and_then(|b| field(b, "message")) {
        message.push_str(" API says: ");
        message.push_str(&render(api_message));
    }

    ClassifiedError { message, status_code: status }
}

const fn status_message(status: u16) -> Option<&'static str> {
    match status {
        401 => Some(
            "Authentication failed: Invalid or expired API token. Please check your credentials.",
        ),
        422 => Some("Validation error: The API could not process your request."),
        400 => Some(
            "Bad request: The request was improperly formatted or contained invalid parameters.",
        ),
        403 => Some("Forbidden: You do not have permission to access this resource."),
        404 => Some("Not found: The requested resource does not exist."),
        500.. => Some("Server error: The BCL server encountered an error."),
        _ => None,
    }
}

/// Returns a body field unless it is absent, null, false or an empty string.
fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| match v {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn api(status: u16, body: Option<Value>) -> ClassifiedError {
        classify(&BridgeError::Api { status, body })
    }

    #[test]
    fn test_401_with_message() {
        let classified = api(401, Some(json!({"message": "Unauthenticated."})));
        assert_eq!(classified.status_code, 401);
        assert_eq!(
            classified.message,
            "Authentication failed: Invalid or expired API token. Please check your credentials. \
             API says: Unauthenticated."
        );
    }

    #[test]
    fn test_422_prefers_errors() {
        let classified = api(
            422,
            Some(json!({"message": "ignored", "errors": {"amount": ["required"]}})),
        );
        assert_eq!(
            classified.message,
            "Validation error: The API could not process your request. \
             Details: {\"amount\":[\"required\"]}"
        );
    }

    #[test]
    fn test_422_falls_back_to_message() {
        let classified = api(422, Some(json!({"message": "The slug has already been taken."})));
        assert_eq!(
            classified.message,
            "Validation error: The API could not process your request. \
             API says: The slug has already been taken."
        );
    }

    #[test]
    fn test_known_statuses_without_body() {
        assert_eq!(
            api(400, None).message,
            "Bad request: The request was improperly formatted or contained invalid parameters."
        );
        assert_eq!(
            api(403, None).message,
            "Forbidden: You do not have permission to access this resource."
        );
        assert_eq!(api(404, None).message, "Not found: The requested resource does not exist.");
    }

    #[test]
    fn test_server_errors() {
        for status in [500, 502, 503, 599] {
            let classified = api(status, Some(json!({"message": "down"})));
            assert_eq!(classified.status_code, status);
            assert_eq!(
                classified.message,
                "Server error: The BCL server encountered an error. API says: down"
            );
        }
    }

    #[test]
    fn test_unlisted_status_keeps_raw_message() {
        let classified = api(429, Some(json!({"message": "slow down"})));
        assert_eq!(classified.status_code, 429);
        assert_eq!(classified.message, "Request failed with status code 429");
    }

    #[test]
    fn test_empty_message_is_not_appended() {
        let classified = api(404, Some(json!({"message": ""})));
        assert_eq!(classified.message, "Not found: The requested resource does not exist.");
    }

    #[test]
    fn test_local_errors_report_500() {
        let classified =
            classify(&BridgeError::Validation("At least one stock item must be provided".into()));
        assert_eq!(classified.status_code, 500);
        assert_eq!(classified.message, "At least one stock item must be provided");

        let classified = classify(&BridgeError::Transport("connection refused".into()));
        assert_eq!(classified.status_code, 500);
        assert_eq!(classified.message, "Transport error: connection refused");
    }

    #[test]
    fn test_http_error_without_response_reports_500() {
        let source = reqwest::Client::new().get("not a url").build().unwrap_err();
        let error = BridgeError::from(source);
        assert_eq!(error.status(), None);
        assert_eq!(classify(&error).status_code, LOCAL_FAILURE_STATUS);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(api(404, None)).unwrap();
        assert_eq!(value["statusCode"], json!(404));
    }
}
