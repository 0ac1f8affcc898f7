//! The two-stage fluent builder: `RequestBuilder` collects the request,
//! `ResponseBuilder` chooses how the response is consumed and dispatches.

mod request;
mod response;

pub use request::RequestBuilder;
pub use response::ResponseBuilder;
