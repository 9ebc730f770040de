use actix_web::{http::StatusCode, HttpResponse};
pub use tf_shared::types::response::ErrorResponse;

/// actix-web glue for the shared error envelope
pub trait ErrorResponseExt: Sized {
    /// Envelope whose `code` mirrors `status`
    fn for_status(message: impl Into<String>, status: StatusCode) -> Self;

    /// Render with the status carried in `code`
    fn to_response(&self) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn for_status(message: impl Into<String>, status: StatusCode) -> Self {
        ErrorResponse::new(message, status.as_u16())
    }

    fn to_response(&self) -> HttpResponse {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}
