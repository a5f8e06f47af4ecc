//! Response domain types

mod spec;

pub use spec::{ResponseHeaders, ResponseSpec, StatusCode};
