// crates/upy-shim-http/src/url.rs

use crate::error::HttpError;
use std::fmt;

/// Default port for `http:` URLs.
pub const HTTP_PORT: u16 = 80;
/// Default port for `https:` URLs.
pub const HTTPS_PORT: u16 = 443;

/// URL schemes the client can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    /// HTTP over TLS; the server certificate is checked against `host`.
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => HTTP_PORT,
            Scheme::Https => HTTPS_PORT,
        }
    }
}

/// The parts of a `scheme://host[:port]/path` URL needed to open a
/// connection and write the request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    /// Path without its leading slash (e.g., `"status/204"`, or `""` for the root).
    pub path: String,
}

impl Url {
    /// Splits `url` into host, port and path.
    ///
    /// `http:` and `https:` are accepted. Host and path may not contain
    /// whitespace or control characters, since both end up in the request.
    pub fn parse(url: &str) -> Result<Self, HttpError> {
        // 1. `proto`, the empty segment between the slashes, `host`, and the rest.
        let mut parts = url.splitn(4, '/');
        let proto = parts.next().unwrap_or_default();
        let (Some(""), Some(authority)) = (parts.next(), parts.next()) else {
            return Err(HttpError::InvalidUrl(url.to_string()));
        };
        let path = parts.next().unwrap_or_default();

        // 2. Scheme decides the default port.
        let scheme = match proto {
            "http:" => Scheme::Http,
            "https:" => Scheme::Https,
            _ => return Err(HttpError::UnsupportedProtocol(proto.to_string())),
        };
        let mut port = scheme.default_port();

        // 3. An explicit port overrides it.
        let host = match authority.split_once(':') {
            Some((host, explicit)) => {
                port = explicit
                    .parse()
                    .map_err(|_| HttpError::InvalidUrl(url.to_string()))?;
                host
            }
            None => authority,
        };
        let unsafe_char = |c: char| c.is_whitespace() || c.is_control();
        if host.is_empty() || host.contains(unsafe_char) || path.contains(unsafe_char) {
            return Err(HttpError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = self.scheme.as_str();
        if self.port == self.scheme.default_port() {
            write!(f, "{}://{}/{}", scheme, self.host, self.path)
        } else {
            write!(f, "{}://{}:{}/{}", scheme, self.host, self.port, self.path)
        }
    }
}
