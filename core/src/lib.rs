//! Fluent request/response builders over a threaded request queue.
//!
//! # Overview
//! `volleyer(queue).get(url)?` opens a `RequestBuilder`; headers and a body
//! are added fluently, then `set_target_class::<T>()` (or `after_request()`
//! for text) finalizes it into a `ResponseBuilder<T>`. The response builder
//! dispatches through the `RequestQueue` and decodes the body with a parser
//! chosen by the response's `Content-Type`.
//!
//! # Design
//! - Each builder is single-use. The request builder carries an explicit
//!   open/finalized state and rejects mutation after the transition.
//! - Parsers are trait objects; `TargetType` carries the decode functions
//!   for the caller's type so a parser never needs to be generic.
//! - Network I/O and callback delivery happen on dispatcher threads owned by
//!   `RequestQueue`; builders and parsers never block on the network.

pub mod builder;
pub mod content_type;
pub mod context;
pub mod error;
pub mod http;
pub mod network;
pub mod parser;
pub mod queue;
pub mod target;
mod volleyer;

#[cfg(test)]
mod test_support;

pub use builder::{RequestBuilder, ResponseBuilder};
pub use content_type::{ContentType, ContentTypes};
pub use context::{ErrorListener, VolleyerConfiguration, VolleyerContext};
pub use error::VolleyerError;
pub use self::http::{HttpMethod, HttpRequest, HttpResponse};
pub use network::{Network, UreqNetwork};
pub use parser::{
    IntegratedNetworkResponseParser, JsonNetworkResponseParser, NetworkResponseParser,
    StringNetworkResponseParser, XmlNetworkResponseParser,
};
pub use queue::RequestQueue;
pub use target::{ParsedValue, TargetType};
pub use volleyer::{volleyer, Volleyer};
