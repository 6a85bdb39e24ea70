// crates/upy-shim-macos/src/error.rs

use std::fmt;
use upy_shim::ShimError;
use upy_shim_http::HttpError;
use upy_shim_plist::PlistError;

/// Errors raised by the macOS network and machine backends.
#[derive(Debug)]
pub enum WlanError {
    /// A shell command failed or an operation is unavailable on this host.
    Shim(ShimError),

    /// The `airport` scan output is not a readable plist.
    Plist(PlistError),

    /// An HTTP exchange (captive-portal probe, external IP lookup) failed.
    Http(HttpError),

    /// An RSN/WPA element lists a unicast cipher combination with no auth-mode mapping.
    UnknownCiphers(Vec<i64>),

    /// A scan record lacks a required key (e.g., `SSID_STR`).
    MissingField(&'static str),

    /// A plist value has the wrong type (e.g., `RSSI` is not an integer).
    UnexpectedShape(&'static str),

    /// A command printed something that could not be interpreted.
    InvalidOutput(String),

    /// `networksetup` reported an error, or the association never completed.
    ConnectionFailed(String),

    /// The scan found no network without authentication.
    NoOpenNetworks,

    /// Every open network was tried and none gave Internet access.
    AllCandidatesFailed,
}

impl From<ShimError> for WlanError {
    fn from(e: ShimError) -> Self {
        WlanError::Shim(e)
    }
}

impl From<PlistError> for WlanError {
    fn from(e: PlistError) -> Self {
        WlanError::Plist(e)
    }
}

impl From<HttpError> for WlanError {
    fn from(e: HttpError) -> Self {
        WlanError::Http(e)
    }
}

impl From<hex::FromHexError> for WlanError {
    fn from(e: hex::FromHexError) -> Self {
        WlanError::InvalidOutput(format!("invalid hex: {}", e))
    }
}

impl fmt::Display for WlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shim(e) => write!(f, "{}", e),
            Self::Plist(e) => write!(f, "Scan output error: {}", e),
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::UnknownCiphers(ciphers) => write!(f, "Unknown uciphers: {:?}", ciphers),
            Self::MissingField(key) => write!(f, "Scan record has no '{}'", key),
            Self::UnexpectedShape(what) => write!(f, "Unexpected plist shape: {}", what),
            Self::InvalidOutput(out) => write!(f, "Unexpected command output: {:?}", out),
            Self::ConnectionFailed(why) => write!(f, "Connection error: {}", why),
            Self::NoOpenNetworks => write!(f, "No open wireless networks"),
            Self::AllCandidatesFailed => write!(f, "Could not connect to any open AP"),
        }
    }
}

impl std::error::Error for WlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shim(e) => Some(e),
            Self::Plist(e) => Some(e),
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}
