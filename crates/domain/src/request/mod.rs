//! Request domain types

mod method;
mod spec;

pub use method::HttpMethod;
pub use spec::{
    BasicAuth, BodyPayload, DEFAULT_TIMEOUT_SECS, Headers, QueryParams, RequestSpec, parse_pair,
};
