//! Middleware for logging requests and responses.

use axum::{body::to_bytes, extract::Request, middleware::Next, response::Response};

/// The longest response body, in bytes, logged at the `info` level.
const LOG_BODY_LENGTH_LIMIT: usize = 256;

/// Log each request line and the response status and body.
///
/// Responses are logged at the `info` level. Bodies longer than
/// [LOG_BODY_LENGTH_LIMIT] bytes are truncated, with the full body logged at
/// the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::info!("Received request: {method} {uri}");

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let body_text = String::from_utf8_lossy(&body_bytes);

    if body_text.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Responding {} to {method} {uri} with body: {}...",
            parts.status,
            truncate_to_char_boundary(&body_text, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body_text}");
    } else {
        tracing::info!(
            "Responding {} to {method} {uri} with body: {body_text}",
            parts.status
        );
    }

    Response::from_parts(parts, body_bytes.into())
}

/// Take the longest prefix of `text` that is at most `limit` bytes and does
/// not split a multi-byte character.
fn truncate_to_char_boundary(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}
