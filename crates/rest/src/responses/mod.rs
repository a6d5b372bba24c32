//! Response shaping: pagination headers.

mod headers;

pub use headers::pagination_headers;
