//! Request descriptors.
//!
//! A [`RequestDescriptor`] is the fully resolved HTTP method, path, query and JSON body
//! for one outbound call. Descriptors are plain values: built per item by the
//! [dispatcher](crate::dispatch) and handed to an [executor](crate::transport::HttpExecutor).

use std::fmt;

use serde::Serialize;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Characters escaped inside one path segment: the URL path set plus `/` and `%`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

use crate::credentials::Credentials;

/// HTTP methods used by the BCL API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }

    /// Returns true if requests with this method carry a JSON body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully resolved outbound request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Endpoint path relative to the base URL, without query string.
    pub path: String,
    /// Query parameters in emission order.
    pub query: Vec<(String, String)>,
    /// JSON body, present only for POST and PATCH.
    pub body: Option<Map<String, Value>>,
}

impl RequestDescriptor {
    /// Creates a body-less `GET` descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: HttpMethod::Get, path: path.into(), query: Vec::new(), body: None }
    }

    /// Creates a descriptor carrying a JSON body.
    #[must_use]
    pub fn with_body(method: HttpMethod, path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: Some(body) }
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Returns the path with its encoded query string appended.
    ///
    /// The `?` separator is only added when at least one parameter is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use bcl_bridge::request::RequestDescriptor;
    ///
    /// let request = RequestDescriptor::get("/forms").with_query(vec![
    ///     ("page".to_owned(), "2".to_owned()),
    ///     ("status".to_owned(), "active".to_owned()),
    /// ]);
    /// assert_eq!(request.path_and_query(), "/forms?page=2&status=active");
    /// assert_eq!(RequestDescriptor::get("/forms").path_and_query(), "/forms");
    /// ```
    #[must_use]
    pub fn path_and_query(&self) -> String {
        let query = encode_query(&self.query);
        if query.is_empty() { self.path.clone() } else { format!("{}?{query}", self.path) }
    }

    /// Returns the absolute URL of this request against the credential's base URL.
    #[must_use]
    pub fn url(&self, credentials: &Credentials) -> String {
        format!("{}{}", credentials.base_url().trim_end_matches('/'), self.path_and_query())
    }
}

/// Encodes query pairs as `key=value&key=value`.
///
/// Values are form-encoded, so spaces become `+` and reserved characters are
/// percent-escaped. This differs from `%20`-style component encoding on purpose; the API
/// decodes both forms the same way.
#[must_use]
pub fn encode_query(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Percent-encodes an identifier so it stays a single path segment.
///
/// ```
/// use bcl_bridge::request::encode_path_segment;
///
/// assert_eq!(encode_path_segment("ORD-1"), "ORD-1");
/// assert_eq!(encode_path_segment("ORD?x#1/2"), "ORD%3Fx%231%2F2");
/// ```
#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Builder for snake_case JSON request bodies.
///
/// Encodes the inclusion rules of the BCL API: optional fields are omitted when absent
/// or empty, and status-like flags are sent as the strings `"1"`/`"0"`.
#[derive(Debug, Default)]
pub struct BodyBuilder {
    fields: Map<String, Value>,
}

impl BodyBuilder {
    /// Creates an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field unconditionally.
    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_owned(), value.into());
        self
    }

    /// Sets a field when the value is present.
    #[must_use]
    pub fn optional(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    /// Sets a string field when it is present and non-empty.
    #[must_use]
    pub fn non_empty(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.field(key, value),
            _ => self,
        }
    }

    /// Sets a flag as `"1"` or `"0"`.
    #[must_use]
    pub fn flag(self, key: &str, value: bool) -> Self {
        self.field(key, flag_str(value))
    }

    /// Sets a flag as `"1"` or `"0"` when present.
    #[must_use]
    pub fn optional_flag(self, key: &str, value: Option<bool>) -> Self {
        self.optional(key, value.map(flag_str))
    }

    /// Finishes the body.
    #[must_use]
    pub fn build(self) -> Map<String, Value> {
        self.fields
    }
}

const fn flag_str(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
