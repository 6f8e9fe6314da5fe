//! Connection configuration types.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Default JSON-RPC endpoint path.
pub const DEFAULT_PATH: &str = "/webmail/api/jsonrpc";

/// Transport security mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Security {
    /// Plain HTTP (port 80). **Not recommended for production.**
    None,
    /// HTTPS (port 443). **Recommended.**
    #[default]
    Tls,
}

impl Security {
    /// Returns the default port for this security mode.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::None => 80,
            Self::Tls => 443,
        }
    }

    /// Returns the URL scheme for this security mode.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::None => "http",
            Self::Tls => "https",
        }
    }
}

/// JSON-RPC connection configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Security mode.
    pub security: Security,
    /// Endpoint path.
    pub path: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// Whether to honor system proxy settings.
    pub use_system_proxy: bool,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Config {
    /// Creates a new configuration using HTTPS.
    ///
    /// `server` is a hostname with an optional `:port` suffix. Without a
    /// port, 443 is used.
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        ConfigBuilder::new(server).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(server: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(server)
    }

    /// Returns the endpoint URL requests are posted to.
    ///
    /// A bare IPv6 literal host such as `::1` is bracketed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is empty or does not form a valid URL.
    pub fn endpoint(&self) -> Result<Url> {
        if self.host.is_empty() {
            return Err(Error::InvalidConfig("empty host".to_string()));
        }

        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        let mut url = Url::parse(&format!("{}://{host}", self.security.scheme()))?;
        url.set_port(Some(self.port))
            .map_err(|()| Error::InvalidConfig(format!("cannot set port on {}", self.host)))?;
        url.set_path(&self.path);
        Ok(url)
    }
}

/// Builder for connection configuration.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    host: String,
    port: Option<u16>,
    security: Security,
    path: String,
    connect_timeout: Duration,
    request_timeout: Duration,
    use_system_proxy: bool,
    user_agent: String,
}

impl ConfigBuilder {
    /// Creates a new builder with the given server (`host` or `host:port`).
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        let (host, port) = split_host_port(server.into());
        Self {
            host,
            port,
            security: Security::Tls,
            path: DEFAULT_PATH.to_string(),
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            use_system_proxy: true,
            user_agent: concat!("webmail-rpc/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the security mode.
    #[must_use]
    pub const fn security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    /// Sets the endpoint path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the whole-request timeout.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enables or disables system proxy detection.
    #[must_use]
    pub const fn use_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            host: self.host,
            port: self.port.unwrap_or_else(|| self.security.default_port()),
            security: self.security,
            path: self.path,
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            use_system_proxy: self.use_system_proxy,
            user_agent: self.user_agent,
        }
    }
}

/// Splits `host:port`, leaving IPv6 literals and non-numeric suffixes intact.
fn split_host_port(server: String) -> (String, Option<u16>) {
    if let Some((host, port)) = server.rsplit_once(':') {
        let bracketed = host.starts_with('[') && host.ends_with(']');
        if (bracketed || !host.contains(':'))
            && let Ok(port) = port.parse::<u16>()
        {
            return (host.to_string(), Some(port));
        }
    }
    (server, None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(Security::None.default_port(), 80);
        assert_eq!(Security::Tls.default_port(), 443);
    }

    #[test]
    fn test_config_new() {
        let config = Config::new("mail.example.com");
        assert_eq!(config.host, "mail.example.com");
        assert_eq!(config.port, 443);
        assert_eq!(config.security, Security::Tls);
        assert_eq!(config.path, DEFAULT_PATH);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_config_new_with_port() {
        let config = Config::new("mail.example.com:4040");
        assert_eq!(config.host, "mail.example.com");
        assert_eq!(config.port, 4040);
    }

    #[test]
    fn test_endpoint() {
        let url = Config::new("mail.example.com").endpoint().unwrap();
        assert_eq!(url.as_str(), "https://mail.example.com/webmail/api/jsonrpc");

        let url = Config::builder("localhost:8080")
            .security(Security::None)
            .path("/api")
            .build()
            .endpoint()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api");
    }

    #[test]
    fn test_endpoint_ipv6() {
        let url = Config::new("::1").endpoint().unwrap();
        assert_eq!(url.as_str(), "https://[::1]/webmail/api/jsonrpc");

        let url = Config::new("[::1]:8443").endpoint().unwrap();
        assert_eq!(url.as_str(), "https://[::1]:8443/webmail/api/jsonrpc");

        let url = Config::builder("fe80::2")
            .security(Security::None)
            .port(8080)
            .build()
            .endpoint()
            .unwrap();
        assert_eq!(url.as_str(), "http://[fe80::2]:8080/webmail/api/jsonrpc");
    }

    #[test]
    fn test_endpoint_bad_host() {
        let err = Config::new("host:abc").endpoint().unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_endpoint_empty_host() {
        let err = Config::new("").endpoint().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_config_builder_default_port() {
        let config = Config::builder("mail.example.com")
            .security(Security::None)
            .build();
        assert_eq!(config.port, 80);
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(
            split_host_port("host:99".to_string()),
            ("host".to_string(), Some(99))
        );
        assert_eq!(
            split_host_port("host:abc".to_string()),
            ("host:abc".to_string(), None)
        );
        assert_eq!(
            split_host_port("[::1]:8443".to_string()),
            ("[::1]".to_string(), Some(8443))
        );
        assert_eq!(split_host_port("::1".to_string()), ("::1".to_string(), None));
    }
}
