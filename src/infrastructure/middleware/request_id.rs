use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware to attach a request ID to each request and its response.
///
/// A caller-supplied `x-request-id` is kept when it is short printable ASCII;
/// otherwise a fresh UUID is generated.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    // Everything logged while handling the request carries its id
    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, header_value);
    }

    response
}

fn incoming_request_id(request: &Request) -> Option<String> {
    let value = request.headers().get(X_REQUEST_ID)?.to_str().ok()?.trim();

    let acceptable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());

    acceptable.then(|| value.to_string())
}
