// Server Endpoint

use super::error::{DomainError, Result};
use url::Url;

const DEFAULT_SCHEME: &str = "http://";

/// Base address of one AskOmics instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    base: Url,
}

impl ServerEndpoint {
    /// Build an endpoint from a server URL and an optional port
    ///
    /// A URL without a scheme is taken as plain HTTP. When `port` is given
    /// it replaces whatever port the URL carries.
    pub fn new(url: &str, port: Option<u16>) -> Result<Self> {
        let raw = url.trim();
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("{DEFAULT_SCHEME}{raw}")
        };

        let invalid = |reason: String| DomainError::InvalidServerUrl {
            url: url.to_string(),
            reason,
        };

        let mut base = Url::parse(&with_scheme).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }
        if let Some(port) = port {
            base.set_port(Some(port))
                .map_err(|_| invalid(format!("cannot set port {port}")))?;
        }

        Ok(Self { base })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Absolute URL of an API path such as `/login_api`
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

impl std::fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_paths() {
        let endpoint = ServerEndpoint::new("http://askomics.example.org/", None).unwrap();
        assert_eq!(
            endpoint.url_for("/login_api"),
            "http://askomics.example.org/login_api"
        );
        assert_eq!(
            endpoint.url_for("up/file"),
            "http://askomics.example.org/up/file"
        );
    }

    #[test]
    fn test_port_overrides_url() {
        let endpoint = ServerEndpoint::new("http://localhost:5000", Some(6543)).unwrap();
        assert_eq!(endpoint.base_url(), "http://localhost:6543");
    }

    #[test]
    fn test_port_added_when_missing() {
        let endpoint = ServerEndpoint::new("https://askomics.example.org/instance", Some(8443))
            .unwrap();
        assert_eq!(
            endpoint.url_for("/load_ttl_into_graph"),
            "https://askomics.example.org:8443/instance/load_ttl_into_graph"
        );
    }

    #[test]
    fn test_missing_scheme_defaults_to_http() {
        let endpoint = ServerEndpoint::new("localhost", Some(6543)).unwrap();
        assert_eq!(endpoint.to_string(), "http://localhost:6543");
    }

    #[test]
    fn test_invalid_url() {
        let err = ServerEndpoint::new("http://", None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidServerUrl { .. }));
    }
}
