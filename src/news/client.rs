use crate::news::types::{decode, Article};
use crate::util::{validate_endpoint, UrlValidationError};
use futures::StreamExt;
use reqwest::redirect::Policy;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Path of the top-headlines resource, relative to the endpoint root.
pub const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Everything that can go wrong between sending the request and holding a
/// decoded article list.
///
/// Callers that only care about the coarse outcome use [`FetchError::kind`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, TLS or body-stream failure
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Whole exchange exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Server answered with a non-2xx status
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Body exceeded the 5MB limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Connection closed before Content-Length bytes arrived
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
    /// Body was not a `{ "articles": [...] }` document
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Collapse to the two failure kinds the feed distinguishes.
    pub fn kind(&self) -> crate::news::FailureKind {
        use crate::news::FailureKind;
        match self {
            FetchError::Decode(_) => FailureKind::Decode,
            FetchError::Network(_)
            | FetchError::Timeout(_)
            | FetchError::HttpStatus(_)
            | FetchError::ResponseTooLarge(_)
            | FetchError::IncompleteResponse { .. } => FailureKind::Transport,
        }
    }
}

/// Errors building a [`NewsClient`] from settings.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("Invalid news endpoint: {0}")]
    Endpoint(#[from] UrlValidationError),
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Fixed request parameters for the headlines endpoint.
///
/// Nothing here is user-adjustable at runtime; it comes from the config file
/// once at startup.
#[derive(Clone)]
pub struct NewsSettings {
    pub endpoint: String,
    pub country: String,
    pub category: String,
    pub api_key: Option<SecretString>,
    pub timeout: Duration,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org".to_string(),
            country: "us".to_string(),
            category: "business".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for NewsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsSettings")
            .field("endpoint", &self.endpoint)
            .field("country", &self.country)
            .field("category", &self.category)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Limit redirects to 3 hops and refuse loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            to = %url.host_str().unwrap_or(""),
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// HTTP client for the top-headlines resource.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so a
/// clone can be moved into a spawned task per fetch.
#[derive(Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    /// Request URL without the credential; safe to log.
    request_url: Url,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl NewsClient {
    pub fn new(settings: &NewsSettings) -> Result<Self, ClientBuildError> {
        let endpoint = validate_endpoint(&settings.endpoint)?;

        let mut request_url = endpoint
            .join(TOP_HEADLINES_PATH)
            .map_err(UrlValidationError::InvalidUrl)?;
        request_url
            .query_pairs_mut()
            .append_pair("country", &settings.country)
            .append_pair("category", &settings.category);

        if settings.api_key.is_none() {
            tracing::warn!("No news API key configured; the endpoint will likely reject requests");
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("watchdogs/", env!("CARGO_PKG_VERSION")))
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(1)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            request_url,
            api_key: settings.api_key.clone(),
            timeout: settings.timeout,
        })
    }

    /// The request URL with the credential omitted.
    pub fn display_url(&self) -> &str {
        self.request_url.as_str()
    }

    /// Issue exactly one request for the current headlines.
    ///
    /// No retry and no caching. The timeout covers the whole exchange,
    /// body included.
    pub async fn fetch(&self) -> Result<Vec<Article>, FetchError> {
        tracing::debug!(url = %self.request_url, "Fetching headlines");

        let articles = tokio::time::timeout(self.timeout, self.fetch_inner())
            .await
            .map_err(|_| FetchError::Timeout(self.timeout.as_secs()))??;

        tracing::info!(count = articles.len(), "Fetched headlines");
        Ok(articles)
    }

    async fn fetch_inner(&self) -> Result<Vec<Article>, FetchError> {
        let response = self.http.get(self.authorized_url()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        Ok(decode(&bytes)?)
    }

    fn authorized_url(&self) -> Url {
        let mut url = self.request_url.clone();
        if let Some(key) = &self.api_key {
            url.query_pairs_mut()
                .append_pair("apiKey", key.expose_secret());
        }
        url
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::FailureKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ONE_ARTICLE: &str = r#"{"articles":[{"title":"A","description":"d","url":"u1","source":{"id":null,"name":"S"}}]}"#;

    fn settings_for(server: &MockServer) -> NewsSettings {
        NewsSettings {
            endpoint: server.uri(),
            api_key: Some(SecretString::from("test-key-123".to_string())),
            ..NewsSettings::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/top-headlines"))
            .and(query_param("country", "us"))
            .and(query_param("category", "business"))
            .and(query_param("apiKey", "test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ONE_ARTICLE))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NewsClient::new(&settings_for(&mock_server)).unwrap();
        let articles = client.fetch().await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[0].url, "u1");
    }

    #[tokio::test]
    async fn test_display_url_omits_key() {
        let mock_server = MockServer::start().await;
        let client = NewsClient::new(&settings_for(&mock_server)).unwrap();

        assert!(client.display_url().contains("country=us"));
        assert!(client.display_url().contains("category=business"));
        assert!(!client.display_url().contains("test-key-123"));
    }

    #[tokio::test]
    async fn test_fetch_without_key_sends_no_key_param() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let settings = NewsSettings {
            endpoint: mock_server.uri(),
            ..NewsSettings::default()
        };
        let client = NewsClient::new(&settings).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus(401)));
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].url.as_str().contains("apiKey"));
    }

    #[tokio::test]
    async fn test_http_error_is_transport_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1) // no retry
            .mount(&mock_server)
            .await;

        let client = NewsClient::new(&settings_for(&mock_server)).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::HttpStatus(500)));
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"articles":[{"title":"#))
            .mount(&mock_server)
            .await;

        let client = NewsClient::new(&settings_for(&mock_server)).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(ONE_ARTICLE)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let settings = NewsSettings {
            timeout: Duration::from_millis(100),
            ..settings_for(&mock_server)
        };
        let client = NewsClient::new(&settings).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout(_)));
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a".repeat(MAX_RESPONSE_SIZE + 1)))
            .mount(&mock_server)
            .await;

        let client = NewsClient::new(&settings_for(&mock_server)).unwrap();
        let err = client.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::ResponseTooLarge(_)));
    }

    #[test]
    fn test_plain_http_endpoint_rejected() {
        let settings = NewsSettings {
            endpoint: "http://newsapi.example.com".to_string(),
            ..NewsSettings::default()
        };
        let result = NewsClient::new(&settings);
        assert!(matches!(result, Err(ClientBuildError::Endpoint(_))));
    }

    #[test]
    fn test_default_endpoint_accepted() {
        let client = NewsClient::new(&NewsSettings::default()).unwrap();
        assert_eq!(
            client.display_url(),
            "https://newsapi.org/v2/top-headlines?country=us&category=business"
        );
    }

    #[test]
    fn test_settings_debug_masks_key() {
        let settings = NewsSettings {
            api_key: Some(SecretString::from("super-secret".to_string())),
            ..NewsSettings::default()
        };
        let out = format!("{:?}", settings);
        assert!(!out.contains("super-secret"));
        assert!(out.contains("[REDACTED]"));
    }
}
