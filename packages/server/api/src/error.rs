use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::LocatorError;
use shared::dto::ErrorResponse;

pub enum ServiceError {
    BadRequest(String),
    Locator(LocatorError),
}

impl From<LocatorError> for ServiceError {
    fn from(err: LocatorError) -> Self {
        ServiceError::Locator(err)
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::BadRequest(e) => (StatusCode::BAD_REQUEST, e),
            ServiceError::Locator(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            ServiceError::Locator(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
