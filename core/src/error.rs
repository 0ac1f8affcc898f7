//! Error types for the request and response builders.
//!
//! # Design
//! Builder misuse (`InvalidArgument`, `IllegalState`) is returned
//! synchronously from the builder call that caused it. Everything that can go
//! wrong after dispatch (transport, status, parsing) is delivered as a value
//! through `ResponseBuilder::send` or the error listener, so callers handle
//! success and failure through the same channel.

use thiserror::Error;

/// Errors produced by builders, parsers and the request queue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VolleyerError {
    /// A required argument was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A builder was mutated or transitioned after it was finalized.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The response body could not be decoded into the target type.
    #[error("parse error: {0}")]
    Parse(String),

    /// An unexpected failure while turning a response into a value.
    #[error("request error: {0}")]
    Request(String),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}
