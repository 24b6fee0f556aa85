use axum::{
    body::to_bytes,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    error::AppError,
    response::{JsonApiResponse, log_app_error},
};

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Prefixes axum puts in front of extractor rejection texts.
const REJECTION_PREFIXES: &[&str] = &[
    "Failed to deserialize the JSON body into the target type: ",
    "Failed to parse the request body as JSON: ",
    "Invalid URL: ",
];

/// Puts error responses that are not already JSON (extractor rejections,
/// router 404/405) into the `{status, message, data}` envelope.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let route = format!("{} {}", req.method(), req.uri().path());
    let response = next.run(req).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || has_json_body(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let text = to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();
    let err = classify(status, describe(status, &text, &route));
    if status.is_server_error() {
        log_app_error(&err, status);
    }

    let mut enveloped = JsonApiResponse::from_error(&err).into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            enveloped.headers_mut().insert(name.clone(), value.clone());
        }
    }
    enveloped
}

fn has_json_body(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("application/json") || value.contains("+json")
        })
}

fn describe(status: StatusCode, text: &str, route: &str) -> String {
    if text.is_empty() {
        return match status {
            StatusCode::NOT_FOUND => format!("No route for {route}"),
            _ => status.canonical_reason().unwrap_or("Request failed").to_string(),
        };
    }
    REJECTION_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text)
        .to_string()
}

/// 422 from the JSON extractor is reported as a plain validation failure.
fn classify(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        StatusCode::SERVICE_UNAVAILABLE => AppError::unavailable(message),
        _ if status.is_client_error() => AppError::bad_request(message),
        _ => AppError::internal(message),
    }
}
