// crates/upy-shim-http/src/client.rs

use crate::error::HttpError;
use crate::request::{Method, RequestOptions, write_request};
use crate::response::Response;
use crate::url::{Scheme, Url};
use log::{debug, info};
use std::io::{self, BufReader, Read, Write};
use std::net::TcpStream;

/// A connection to the server named in a URL, encrypted for `https:`.
#[derive(Debug)]
pub enum Stream {
    Plain(TcpStream),
    #[cfg(feature = "tls")]
    Tls(Box<native_tls::TlsStream<TcpStream>>),
}

impl Stream {
    /// Opens a TCP connection to `url` and, for `https:`, completes the TLS
    /// handshake with `url.host` as the expected server name.
    pub fn connect(url: &Url) -> Result<Self, HttpError> {
        let tcp = TcpStream::connect((url.host.as_str(), url.port))?;
        match url.scheme {
            Scheme::Http => Ok(Stream::Plain(tcp)),
            #[cfg(feature = "tls")]
            Scheme::Https => {
                let connector = native_tls::TlsConnector::new()?;
                let tls = connector.connect(&url.host, tcp).map_err(|e| match e {
                    native_tls::HandshakeError::Failure(e) => HttpError::Tls(e),
                    // Only non-blocking sockets stop mid-handshake.
                    native_tls::HandshakeError::WouldBlock(_) => {
                        HttpError::Io(io::ErrorKind::WouldBlock.into())
                    }
                })?;
                debug!("TLS session established with {}", url.host);
                Ok(Stream::Tls(Box::new(tls)))
            }
            #[cfg(not(feature = "tls"))]
            Scheme::Https => Err(HttpError::UnsupportedProtocol("https:".to_string())),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(s) => s.read(buf),
            #[cfg(feature = "tls")]
            Stream::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Stream::Plain(s) => s.write(buf),
            #[cfg(feature = "tls")]
            Stream::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Stream::Plain(s) => s.flush(),
            #[cfg(feature = "tls")]
            Stream::Tls(s) => s.flush(),
        }
    }
}

/// Performs one exchange over an already-connected stream.
///
/// The request is written to `stream`, then the status line and headers are
/// read back. The body stays in the stream until the response asks for it.
pub fn request_over<S: Read + Write>(
    mut stream: S,
    method: Method,
    url: &Url,
    options: &RequestOptions,
) -> Result<Response<BufReader<S>>, HttpError> {
    debug!("{} {}", method, url);
    write_request(&mut stream, method, url, options)?;
    Response::read_head(BufReader::new(stream), options.capture_headers)
}

/// Connects to the host named in `url` and performs one exchange.
pub fn request(
    method: Method,
    url: &str,
    options: &RequestOptions,
) -> Result<Response<BufReader<Stream>>, HttpError> {
    let url = Url::parse(url)?;
    let stream = Stream::connect(&url)?;
    let response = request_over(stream, method, &url, options)?;
    info!("{} {} -> {} {}", method, url, response.status_code, response.reason);
    Ok(response)
}

pub fn head(url: &str, options: &RequestOptions) -> Result<Response<BufReader<Stream>>, HttpError> {
    request(Method::Head, url, options)
}

pub fn get(url: &str, options: &RequestOptions) -> Result<Response<BufReader<Stream>>, HttpError> {
    request(Method::Get, url, options)
}

pub fn post(url: &str, options: &RequestOptions) -> Result<Response<BufReader<Stream>>, HttpError> {
    request(Method::Post, url, options)
}

pub fn put(url: &str, options: &RequestOptions) -> Result<Response<BufReader<Stream>>, HttpError> {
    request(Method::Put, url, options)
}

pub fn patch(url: &str, options: &RequestOptions) -> Result<Response<BufReader<Stream>>, HttpError> {
    request(Method::Patch, url, options)
}

pub fn delete(url: &str, options: &RequestOptions) -> Result<Response<BufReader<Stream>>, HttpError> {
    request(Method::Delete, url, options)
}
