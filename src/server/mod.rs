//! # Server Boundary Module
//!
//! Request and response types exchanged with the embedding HTTP listener.
//!
//! This crate owns no sockets: the accept loop, HTTP framing, connection
//! lifecycle, and body streaming all belong to the host runtime. The host
//! builds a [`Request`] from its wire types, hands it to
//! [`crate::Dispatcher::handle`] together with an empty [`Response`], and
//! serializes whatever the pipeline wrote back to the wire.

mod request;
mod response;

pub use request::{parse_query_params, Request};
pub use response::{HeaderVec, Response, MAX_INLINE_HEADERS};
