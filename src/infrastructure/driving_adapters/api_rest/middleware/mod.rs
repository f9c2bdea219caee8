//! API Middleware
//!
//! Request correlation and cross-origin policy for the REST API.

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
