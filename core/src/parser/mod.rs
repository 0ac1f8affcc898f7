//! Content-type parsers that turn response bytes into the caller's type.
//!
//! # Design
//! A parser is a trait object chosen by the response's `Content-Type`. It
//! receives the response and a `TargetType` and returns the decoded value
//! boxed as `Any`. Every failure to decode comes back as
//! `VolleyerError::Parse`; a panic inside a parser is caught by
//! `parse_response` and reported as `VolleyerError::Request`.

mod integrated;
mod json;
mod string;
mod xml;

use std::borrow::Cow;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::content_type::ContentTypes;
use crate::error::VolleyerError;
use crate::http::HttpResponse;
use crate::target::{ParsedValue, TargetType};

pub use integrated::{IntegratedNetworkResponseParser, IntegratedNetworkResponseParserBuilder};
pub use json::JsonNetworkResponseParser;
pub use string::StringNetworkResponseParser;
pub use xml::XmlNetworkResponseParser;

/// Converts a buffered response into a value of the requested type.
pub trait NetworkResponseParser: Send + Sync {
    fn parse(
        &self,
        response: &HttpResponse,
        target: &TargetType,
    ) -> Result<ParsedValue, VolleyerError>;

    /// Media types this parser understands.
    fn content_types(&self) -> ContentTypes;
}

static DEFAULT_PARSER: Lazy<Arc<IntegratedNetworkResponseParser>> = Lazy::new(|| {
    Arc::new(
        IntegratedNetworkResponseParser::builder()
            .add_parser(JsonNetworkResponseParser::new())
            .add_parser(XmlNetworkResponseParser::new())
            .add_parser(StringNetworkResponseParser::new())
            .fallback(StringNetworkResponseParser::new())
            .build(),
    )
});

/// The process-wide default parser: JSON, XML and text, falling back to text
/// for unknown content types.
pub fn default_parser() -> Arc<dyn NetworkResponseParser> {
    DEFAULT_PARSER.clone()
}

/// Labels that name true ISO-8859-1. `encoding_rs` maps them to
/// windows-1252, which differs in 0x80..=0x9F.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "csisolatin1",
    "iso-ir-100",
];

/// Decode the response body using the charset declared in its headers.
pub fn decode_body(response: &HttpResponse) -> Result<Cow<'_, str>, VolleyerError> {
    let charset = response.charset();
    let label = charset.trim();
    if LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)) {
        return Ok(encoding_rs::mem::decode_latin1(&response.body));
    }
    let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
        .ok_or_else(|| VolleyerError::Parse(format!("unsupported charset: {charset}")))?;
    let (text, had_errors) = encoding.decode_without_bom_handling(&response.body);
    if had_errors {
        return Err(VolleyerError::Parse(format!(
            "response body is not valid {}",
            encoding.name()
        )));
    }
    Ok(text)
}

/// Run `parser`, turning a panic into `VolleyerError::Request`.
pub fn parse_response(
    parser: &dyn NetworkResponseParser,
    response: &HttpResponse,
    target: &TargetType,
) -> Result<ParsedValue, VolleyerError> {
    match catch_unwind(AssertUnwindSafe(|| parser.parse(response, target))) {
        Ok(result) => result,
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser panicked".to_string());
            Err(VolleyerError::Request(message))
        }
    }
}
