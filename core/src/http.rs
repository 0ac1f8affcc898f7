//! HTTP transport types passed between the builders and the request queue.
//!
//! # Design
//! Requests and responses are plain data. The builders produce an
//! `HttpRequest`, a `Network` implementation turns it into an `HttpResponse`,
//! and a parser turns the response bytes into the caller's type. Headers are
//! kept as an ordered list of pairs; lookups are case-insensitive.

use std::fmt;

/// Charset assumed when a response does not declare one.
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Trace,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Whether requests with this method may carry a body.
    pub fn allows_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Produced by `RequestBuilder` when it is finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Charset declared by the `Content-Type` header, or `DEFAULT_CHARSET`.
    pub fn charset(&self) -> String {
        parse_charset(&self.headers)
    }
}

/// Resolve the `charset` parameter of the `Content-Type` header.
///
/// Falls back to `DEFAULT_CHARSET` when the header is absent, unparsable, or
/// carries no charset parameter.
pub fn parse_charset(headers: &[(String, String)]) -> String {
    find_header(headers, "content-type")
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .and_then(|parsed| parsed.get_param(mime::CHARSET).map(|c| c.as_str().to_string()))
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
