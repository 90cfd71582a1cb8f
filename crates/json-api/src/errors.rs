//! HTTP error responses.

use salvo::{
    handler,
    http::{ResBody, StatusCode},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{FlowCtrl, Json, Response},
    writing::Scribe,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const DUPLICATE_MESSAGE: &str = "A product with this name already exists.";
pub(crate) const NOT_FOUND_MESSAGE: &str = "Product not found.";
pub(crate) const UNAUTHORIZED_MESSAGE: &str = "Password does not match.";
pub(crate) const INTERNAL_MESSAGE: &str =
    "An unexpected error occurred. Please contact the administrator.";

/// A response carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Every failure a product endpoint can answer with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ApiError {
    /// Carries the first validation failure.
    #[error("{0}")]
    Validation(String),

    #[error("A product with this name already exists.")]
    Duplicate,

    #[error("Product not found.")]
    NotFound,

    #[error("Password does not match.")]
    Unauthorized,

    /// Details are logged where the failure happens, never sent.
    #[error("An unexpected error occurred. Please contact the administrator.")]
    Internal,
}

impl ApiError {
    pub(crate) fn message(&self) -> &str {
        match self {
            Self::Validation(message) => message,
            Self::Duplicate => DUPLICATE_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::Unauthorized => UNAUTHORIZED_MESSAGE,
            Self::Internal => INTERNAL_MESSAGE,
        }
    }

    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Duplicate => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());
        res.render(Json(MessageResponse::new(self.message())));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Validation failed or name already taken"),
            (StatusCode::UNAUTHORIZED, "Password does not match"),
            (StatusCode::NOT_FOUND, "Product not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description).add_content(
                    "application/json",
                    oapi::Content::new(MessageResponse::to_schema(components)),
                ),
            );
        }
    }
}

/// Gives router-level failures (unmatched routes, wrong methods, caught
/// panics) the same `{ "message" }` body as handler errors.
#[handler]
pub(crate) async fn json_fallback(res: &mut Response, ctrl: &mut FlowCtrl) {
    if !matches!(res.body, ResBody::None | ResBody::Error(_)) {
        return;
    }

    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    let message = if status.is_server_error() {
        INTERNAL_MESSAGE
    } else {
        status.canonical_reason().unwrap_or("Request failed")
    };

    res.render(Json(MessageResponse::new(message)));
    ctrl.skip_rest();
}
