use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Why a URL was refused.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// Plain HTTP to a remote host would expose the API key.
    #[error("Insecure endpoint: HTTPS required (except localhost for testing)")]
    InsecureEndpoint,
}

fn is_local_host(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => {
            let bare = host
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .unwrap_or(host);
            bare.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
        }
        None => false,
    }
}

/// Validate the news endpoint root.
///
/// The credential travels in the query string, so the endpoint must be
/// HTTPS. Plain HTTP is tolerated only for loopback hosts (mock servers).
///
/// ```
/// use watchdogs::util::validate_endpoint;
///
/// assert!(validate_endpoint("https://newsapi.org").is_ok());
/// assert!(validate_endpoint("http://127.0.0.1:8080").is_ok());
/// assert!(validate_endpoint("http://newsapi.org").is_err());
/// ```
pub fn validate_endpoint(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_local_host(&url) => {
            tracing::warn!(endpoint = %url, "Using non-HTTPS news endpoint (localhost only)");
            Ok(url)
        }
        "http" => Err(UrlValidationError::InsecureEndpoint),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}

/// Validate an article link before handing it to the system browser.
///
/// Only `http` and `https` are passed on; anything else (`file:`,
/// `javascript:`, custom handlers) could launch arbitrary programs.
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}
