// crates/upy-shim-http/src/error.rs

use std::fmt;
use std::io;
use std::str::Utf8Error;

/// Errors that can occur while performing an HTTP exchange.
#[derive(Debug)]
pub enum HttpError {
    /// The URL does not have the `proto://host[/path]` shape, or its port is not a number.
    InvalidUrl(String),

    /// The URL scheme is neither `http:` nor `https:`, or `https:` was
    /// requested from a build without the `tls` feature.
    UnsupportedProtocol(String),

    /// A request header name is empty or a name or value contains CR, LF or
    /// another control character.
    InvalidHeader(String),

    /// The first response line is not `<proto> <status> [reason]`.
    InvalidStatusLine(String),

    /// The server answered with a transfer encoding this client cannot decode.
    UnsupportedTransferEncoding(String),

    /// Both raw data and a JSON body were supplied for the same request.
    ConflictingBody,

    /// An error from the underlying socket or stream.
    Io(io::Error),

    /// The JSON body could not be serialized or the response could not be deserialized.
    Json(serde_json::Error),

    /// The response body is not valid UTF-8.
    Utf8(Utf8Error),

    /// The TLS connector could not be built or the handshake failed.
    #[cfg(feature = "tls")]
    Tls(native_tls::Error),
}

impl From<io::Error> for HttpError {
    fn from(e: io::Error) -> Self {
        HttpError::Io(e)
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(e: serde_json::Error) -> Self {
        HttpError::Json(e)
    }
}

impl From<Utf8Error> for HttpError {
    fn from(e: Utf8Error) -> Self {
        HttpError::Utf8(e)
    }
}

#[cfg(feature = "tls")]
impl From<native_tls::Error> for HttpError {
    fn from(e: native_tls::Error) -> Self {
        HttpError::Tls(e)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Self::UnsupportedProtocol(proto) => write!(f, "Unsupported protocol: {}", proto),
            Self::InvalidHeader(name) => write!(f, "Invalid request header: {:?}", name),
            Self::InvalidStatusLine(line) => write!(f, "Invalid status line: {:?}", line),
            Self::UnsupportedTransferEncoding(line) => write!(f, "Unsupported {}", line),
            Self::ConflictingBody => write!(f, "Request data and JSON body are mutually exclusive"),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Utf8(e) => write!(f, "Response body is not UTF-8: {}", e),
            #[cfg(feature = "tls")]
            Self::Tls(e) => write!(f, "TLS error: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Utf8(e) => Some(e),
            #[cfg(feature = "tls")]
            Self::Tls(e) => Some(e),
            _ => None,
        }
    }
}
