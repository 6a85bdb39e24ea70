// crates/upy-shim-http/src/response.rs

use crate::error::HttpError;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use std::io::BufRead;

/// A received response: status, selected headers, and a body that is read
/// from the stream on first access and cached.
#[derive(Debug)]
pub struct Response<R> {
    pub status_code: u16,
    pub reason: String,
    location: Option<String>,
    headers: Option<Vec<(String, String)>>,
    body: Body<R>,
}

#[derive(Debug)]
enum Body<R> {
    Unread(R),
    Cached(Vec<u8>),
    Closed,
}

impl<R: BufRead> Response<R> {
    /// Reads the status line and header block from `reader`, leaving it
    /// positioned at the start of the body.
    pub fn read_head(mut reader: R, capture_headers: bool) -> Result<Self, HttpError> {
        // 1. Status line: `<proto> <status> [reason]`.
        let line = read_line(&mut reader)?;
        let mut fields = line.trim_end().splitn(3, char::is_whitespace);
        let _proto = fields.next();
        let status_code = fields
            .next()
            .and_then(|status| status.parse::<u16>().ok())
            .ok_or_else(|| HttpError::InvalidStatusLine(line.clone()))?;
        let reason = fields.next().unwrap_or_default().trim().to_string();
        debug!("Response status {} {}", status_code, reason);

        // 2. Headers until a blank line or end of stream.
        let mut location = None;
        let mut headers = capture_headers.then(Vec::new);
        loop {
            let line = read_line(&mut reader)?;
            if line.is_empty() || line == "\r\n" || line == "\n" {
                break;
            }
            trace!("Response header {:?}", line.trim_end());
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());

            if name.eq_ignore_ascii_case("transfer-encoding") {
                if value.contains("chunked") {
                    return Err(HttpError::UnsupportedTransferEncoding(
                        line.trim_end().to_string(),
                    ));
                }
            } else if name.eq_ignore_ascii_case("location") && (300..=399).contains(&status_code) {
                location = Some(value.to_string());
            }

            if let Some(headers) = headers.as_mut() {
                headers.push((name.to_ascii_lowercase(), value.to_string()));
            }
        }

        Ok(Self {
            status_code,
            reason,
            location,
            headers,
            body: Body::Unread(reader),
        })
    }

    /// The `Location` header of a 3xx response.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Whether the status is a 3xx redirect carrying a `Location`.
    pub fn is_redirect(&self) -> bool {
        self.location.is_some()
    }

    /// All response headers, with lower-cased names, when capture was requested.
    pub fn headers(&self) -> Option<&[(String, String)]> {
        self.headers.as_deref()
    }

    /// Looks up a captured header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The raw body. Reads the rest of the stream on first call.
    pub fn content(&mut self) -> Result<&[u8], HttpError> {
        if let Body::Unread(reader) = &mut self.body {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            debug!("Read {} body bytes", buf.len());
            self.body = Body::Cached(buf);
        }
        match &self.body {
            Body::Cached(buf) => Ok(buf.as_slice()),
            _ => Ok(&[]),
        }
    }

    /// The body decoded as UTF-8.
    pub fn text(&mut self) -> Result<&str, HttpError> {
        Ok(std::str::from_utf8(self.content()?)?)
    }

    /// The body deserialized from JSON.
    pub fn json<T: DeserializeOwned>(&mut self) -> Result<T, HttpError> {
        Ok(serde_json::from_slice(self.content()?)?)
    }

    /// Drops the connection and any cached body.
    pub fn close(&mut self) {
        self.body = Body::Closed;
        self.headers = None;
    }
}

/// Reads one line including its terminator; an empty string means end of stream.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String, HttpError> {
    let mut raw = Vec::new();
    reader.read_until(b'\n', &mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}
