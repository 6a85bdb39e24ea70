//! A minimal blocking HTTP/1.0 client modelled on MicroPython's `urequests`.
//!
//! One request per connection and no chunked transfer decoding. `https:` URLs
//! go through `native-tls` when the default `tls` feature is enabled.
//! Redirects are not followed; a 3xx response exposes its `Location` instead,
//! which is what captive-portal detection needs.

// --- Modules ---
pub mod error;
pub mod url;
pub mod request;
pub mod response;
pub mod client;

// --- Top-level Exports ---
pub use error::HttpError;
pub use url::{Scheme, Url};
pub use request::{Method, RequestOptions, write_request};
pub use response::Response;
pub use client::{Stream, delete, get, head, patch, post, put, request, request_over};
