// crates/upy-shim-http/src/request.rs

use crate::error::HttpError;
use crate::url::Url;
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// HTTP request methods supported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Head,
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Head => "HEAD",
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request settings: extra headers, an optional body, and whether the
/// response headers should be kept.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Written in order after `Host`. A caller-supplied `Host` replaces the default one.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub data: Option<Vec<u8>>,
    /// JSON request body. Mutually exclusive with `data`.
    pub json: Option<serde_json::Value>,
    /// Keep all response headers, available through `Response::headers`.
    pub capture_headers: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, HttpError> {
        self.json = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn capture_headers(mut self, capture: bool) -> Self {
        self.capture_headers = capture;
        self
    }

    /// Resolves the bytes to send after the header block.
    fn body(&self) -> Result<Option<Vec<u8>>, HttpError> {
        match (&self.data, &self.json) {
            (Some(_), Some(_)) => Err(HttpError::ConflictingBody),
            (Some(data), None) => Ok(Some(data.clone())),
            (None, Some(json)) => Ok(Some(serde_json::to_vec(json)?)),
            (None, None) => Ok(None),
        }
    }
}

/// Rejects header fields that would end the header line early or start a new one.
fn check_header(name: &str, value: &str) -> Result<(), HttpError> {
    let name_ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_graphic() && c != ':');
    // Tabs are allowed inside values; every other control character is not.
    let value_ok = !value.chars().any(|c| c.is_control() && c != '\t');
    if name_ok && value_ok {
        Ok(())
    } else {
        Err(HttpError::InvalidHeader(name.to_string()))
    }
}

/// Writes an HTTP/1.0 request for `url` to `out`.
///
/// Headers and body are checked before anything is written, so an invalid
/// header or a conflicting body leaves `out` untouched.
pub fn write_request<W: Write>(
    out: &mut W,
    method: Method,
    url: &Url,
    options: &RequestOptions,
) -> Result<(), HttpError> {
    for (name, value) in &options.headers {
        check_header(name, value)?;
    }
    let body = options.body()?.filter(|body| !body.is_empty());

    // 1. Request line and headers.
    write!(out, "{} /{} HTTP/1.0\r\n", method, url.path)?;
    let has_host = options
        .headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("host"));
    if !has_host {
        write!(out, "Host: {}\r\n", url.host)?;
    }
    for (name, value) in &options.headers {
        write!(out, "{}: {}\r\n", name, value)?;
    }
    if let Some(body) = &body {
        write!(out, "Content-Length: {}\r\n", body.len())?;
    }
    out.write_all(b"\r\n")?;

    // 2. Body.
    if let Some(body) = &body {
        out.write_all(body)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(method: Method, url: &str, options: &RequestOptions) -> String {
        let mut out = Vec::new();
        write_request(&mut out, method, &Url::parse(url).unwrap(), options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_minimal_get() {
        let text = render(Method::Get, "http://example.com/index.html", &RequestOptions::new());
        assert_eq!(text, "GET /index.html HTTP/1.0\r\nHost: example.com\r\n\r\n");
    }

    #[test]
    fn test_caller_headers_and_host_override() {
        let options = RequestOptions::new()
            .header("Host", "virtual.example")
            .header("Accept", "*/*");
        let text = render(Method::Head, "http://10.0.0.1:8080/", &options);
        assert_eq!(
            text,
            "HEAD / HTTP/1.0\r\nHost: virtual.example\r\nAccept: */*\r\n\r\n"
        );
    }

    #[test]
    fn test_data_body_sets_content_length() {
        let options = RequestOptions::new().data("a=1&b=2");
        let text = render(Method::Post, "http://example.com/form", &options);
        assert_eq!(
            text,
            "POST /form HTTP/1.0\r\nHost: example.com\r\nContent-Length: 7\r\n\r\na=1&b=2"
        );
    }

    #[test]
    fn test_empty_body_is_not_sent() {
        let options = RequestOptions::new().data(Vec::<u8>::new());
        let text = render(Method::Put, "http://example.com/x", &options);
        assert_eq!(text, "PUT /x HTTP/1.0\r\nHost: example.com\r\n\r\n");
    }

    #[test]
    fn test_json_body() {
        let options = RequestOptions::new()
            .json(&serde_json::json!({"ssid": "CafeNet"}))
            .unwrap();
        let text = render(Method::Patch, "http://example.com/api", &options);
        assert!(text.starts_with("PATCH /api HTTP/1.0\r\n"));
        assert!(text.contains("Content-Length: 18\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"ssid\":\"CafeNet\"}"));
    }

    #[test]
    fn test_data_and_json_conflict() {
        let options = RequestOptions::new()
            .data("x")
            .json(&[1, 2])
            .unwrap();
        let mut out = Vec::new();
        let url = Url::parse("http://example.com/").unwrap();
        let result = write_request(&mut out, Method::Delete, &url, &options);
        assert!(matches!(result, Err(HttpError::ConflictingBody)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_header_line_breaks_rejected() {
        let url = Url::parse("http://example.com/").unwrap();
        let cases = [
            RequestOptions::new().header("X-Token", "abc\r\nX-Admin: 1"),
            RequestOptions::new().header("X-Token", "abc\nGET /other HTTP/1.0"),
            RequestOptions::new().header("X-Token\r\nX-Admin", "1"),
            RequestOptions::new().header("Bad Name", "1"),
            RequestOptions::new().header("", "1"),
        ];
        for options in &cases {
            let mut out = Vec::new();
            let result = write_request(&mut out, Method::Get, &url, options);
            assert!(matches!(result, Err(HttpError::InvalidHeader(_))), "{:?}", options.headers);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_header_value_may_contain_tab() {
        let options = RequestOptions::new().header("X-List", "a,\tb");
        let text = render(Method::Get, "http://example.com/", &options);
        assert!(text.contains("X-List: a,\tb\r\n"));
    }
}
