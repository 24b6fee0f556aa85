use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;

type PanicPayload = Box<dyn Any + Send + 'static>;

/// Text carried by a panic payload, for `panic!("literal")` and formatted
/// panics alike.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

pub fn catch_panic_layer() -> CatchPanicLayer<fn(PanicPayload) -> Response> {
    CatchPanicLayer::custom(panic_response)
}

/// Debug builds echo the panic text to the client; release builds do not.
fn panic_response(payload: PanicPayload) -> Response {
    let details = panic_message(payload.as_ref());
    let message = if cfg!(debug_assertions) {
        format!("internal server error: {details}")
    } else {
        "internal server error".to_string()
    };
    AppError::internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{panic_message, panic_response};

    #[test]
    fn reads_both_payload_kinds() {
        let literal: Box<dyn std::any::Any + Send> = Box::new("boom");
        let formatted: Box<dyn std::any::Any + Send> = Box::new(format!("card {} vanished", 7));
        let other: Box<dyn std::any::Any + Send> = Box::new(42_u8);

        assert_eq!(panic_message(literal.as_ref()), "boom");
        assert_eq!(panic_message(formatted.as_ref()), "card 7 vanished");
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn panics_render_as_internal_errors() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
