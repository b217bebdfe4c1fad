pub mod cors;
pub mod request_id;

pub use cors::{api_cors_layer, preflight_middleware};
pub use request_id::{request_id_middleware, X_REQUEST_ID};
