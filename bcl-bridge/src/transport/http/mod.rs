//! reqwest-backed executor.

use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::{HttpExecutor, parse_error_body, parse_success_body};
use crate::{
    config::{HttpConfig, HttpVersion},
    credentials::Credentials,
    error::{BridgeError, Result},
    request::{HttpMethod, RequestDescriptor},
};

/// Rejects paths with traversal sequences or without a leading `/`.
fn sanitize_path(path: &str) -> Result<&str> {
    if path.contains("..") || path.contains("//") {
        return Err(BridgeError::Transport(format!(
            "invalid path '{path}': traversal sequences not allowed"
        )));
    }
    if !path.starts_with('/') {
        return Err(BridgeError::Transport(format!("path must start with '/': {path}")));
    }
    Ok(path)
}

/// Rejects header names and values carrying control characters.
fn validate_header(name: &str, value: &str) -> Result<()> {
    let has_control = |s: &str| s.contains(['\r', '\n', '\0']);
    if has_control(name) {
        return Err(BridgeError::Transport(
            "Invalid header name: control characters not allowed".to_owned(),
        ));
    }
    if has_control(value) {
        return Err(BridgeError::Transport(format!(
            "Invalid value for header {name}: control characters not allowed"
        )));
    }
    Ok(())
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
        }
    }
}

/// HTTP/1.1 and HTTP/2 executor using reqwest.
///
/// Holds one pooled [`Client`]; clone the transport to share the pool.
///
/// # Examples
///
/// ```
/// use bcl_bridge::{
///     config::{HttpConfig, HttpVersion},
///     transport::HttpTransport,
/// };
///
/// let config = HttpConfig { http_version: HttpVersion::Http1, ..HttpConfig::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// assert_eq!(transport.protocol_name(), "http/1.1");
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a transport with the default [`HttpConfig`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(BridgeError::HttpError)?;

        Ok(Self { client, http_version: config.http_version })
    }

    /// Returns the protocol name for logging.
    #[must_use]
    pub fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }

    #[instrument(
        skip(self, request, credentials),
        fields(method = %request.method, path = %request.path, protocol = self.protocol_name())
    )]
    async fn send(&self, request: &RequestDescriptor, credentials: &Credentials) -> Result<Value> {
        sanitize_path(&request.path)?;

        let url = request.url(credentials);
        let url = Url::parse(&url)
            .map_err(|e| BridgeError::Transport(format!("invalid request URL '{url}': {e}")))?;

        let headers = credentials.headers();
        for (name, value) in &headers {
            validate_header(name, value)?;
        }

        let mut builder = self.client.request(request.method.into(), url);
        for (name, value) in &headers {
            builder = builder.header(*name, value.as_str());
        }
        if request.method.has_body()
            && let Some(body) = &request.body
        {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = bytes.len(), "received response");

        if status.is_success() {
            Ok(parse_success_body(&bytes))
        } else {
            Err(BridgeError::Api { status: status.as_u16(), body: parse_error_body(&bytes) })
        }
    }
}

impl HttpExecutor for HttpTransport {
    async fn execute<'a>(
        &'a self,
        request: &'a RequestDescriptor,
        credentials: &'a Credentials,
    ) -> Result<Value> {
        self.send(request, credentials).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    use super::*;

    fn credentials(server: &MockServer) -> Credentials {
        Credentials::new("test-token", server.uri())
    }

    #[test]
    fn test_protocol_names() {
        for (version, name) in
            [(HttpVersion::Http1, "http/1.1"), (HttpVersion::Http2, "http/2"), (HttpVersion::Auto, "http")]
        {
            let config = HttpConfig { http_version: version, ..HttpConfig::default() };
            assert_eq!(HttpTransport::with_config(&config).unwrap().protocol_name(), name);
        }
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(Method::from(HttpMethod::Patch), Method::PATCH);
        assert_eq!(Method::from(HttpMethod::Get), Method::GET);
    }

    #[test]
    fn test_sanitize_path() {
        assert!(sanitize_path("/forms/1/status").is_ok());
        assert!(matches!(sanitize_path("/transaction/../user"), Err(BridgeError::Transport(_))));
        assert!(matches!(sanitize_path("/forms//1"), Err(BridgeError::Transport(_))));
        assert!(matches!(sanitize_path("forms"), Err(BridgeError::Transport(_))));
    }

    #[test]
    fn test_validate_header() {
        assert!(validate_header("Authorization", "Bearer abc").is_ok());
        assert!(validate_header("Authorization", "Bearer abc\r\nX-Evil: 1").is_err());
        assert!(validate_header("X-Evil\n", "v").is_err());
        assert!(validate_header("Accept", "a\0b").is_err());
    }

    #[tokio::test]
    async fn test_get_sends_auth_headers_without_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forms"))
            .and(query_param("page", "2"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let request = RequestDescriptor::get("/forms")
            .with_query(vec![("page".to_owned(), "2".to_owned())]);
        let response = transport.execute(&request, &credentials(&server)).await.unwrap();
        assert_eq!(response, json!({"data": []}));

        let received = server.received_requests().await.unwrap();
        assert!(
            !received[0]
                .headers
                .iter()
                .any(|(name, _)| name.as_str().eq_ignore_ascii_case("content-type"))
        );
    }

    #[tokio::test]
    async fn test_patch_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/forms/5/status"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"is_active": "0"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut body = Map::new();
        body.insert("is_active".to_owned(), json!("0"));
        let request = RequestDescriptor::with_body(HttpMethod::Patch, "/forms/5/status", body);

        let transport = HttpTransport::new().unwrap();
        let response = transport.execute(&request, &credentials(&server)).await.unwrap();
        assert_eq!(response, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_empty_success_body_is_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let response = transport
            .execute(&Credentials::self_test_request(), &credentials(&server))
            .await
            .unwrap();
        assert_eq!(response, json!({}));
    }

    #[tokio::test]
    async fn test_error_status_carries_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coupons/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Coupon not found"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let result =
            transport.execute(&RequestDescriptor::get("/coupons/404"), &credentials(&server)).await;
        let Err(BridgeError::Api { status, body }) = result else {
            unreachable!("expected Api error")
        };
        assert_eq!(status, 404);
        assert_eq!(body, Some(json!({"message": "Coupon not found"})));
    }

    #[tokio::test]
    async fn test_error_status_with_html_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let result =
            transport.execute(&RequestDescriptor::get("/forms"), &credentials(&server)).await;
        assert!(matches!(result, Err(BridgeError::Api { status: 502, body: None })));
    }

    #[tokio::test]
    async fn test_rejects_traversal_before_sending() {
        let server = MockServer::start().await;
        let transport = HttpTransport::new().unwrap();
        let result = transport
            .execute(&RequestDescriptor::get("/transaction/../user"), &credentials(&server))
            .await;
        assert!(matches!(result, Err(BridgeError::Transport(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_token_with_newline() {
        let server = MockServer::start().await;
        let transport = HttpTransport::new().unwrap();
        let credentials = Credentials::new("token\r\nX-Injected: 1", server.uri());
        let result = transport.execute(&RequestDescriptor::get("/forms"), &credentials).await;
        assert!(matches!(result, Err(BridgeError::Transport(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let transport = HttpTransport::new().unwrap();
        let credentials = Credentials::new("t", "http://127.0.0.1:9");
        let result = transport.execute(&RequestDescriptor::get("/forms"), &credentials).await;
        assert!(matches!(result, Err(BridgeError::HttpError(_))));
    }
}
