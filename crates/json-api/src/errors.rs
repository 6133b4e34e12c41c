//! JSON error envelope.

use salvo::{
    catcher::Catcher,
    handler,
    http::{ResBody, StatusCode},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::{FlowCtrl, Json, Response, Scribe},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Body of every failed response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable failure description
    pub message: String,
}

/// A failed request, rendered as `{ "success": false, "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub(crate) fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub(crate) fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// Log `source` against `context` and hide it behind a generic 500.
    pub(crate) fn internal(context: &str, source: &dyn std::error::Error) -> Self {
        error!("{context}: {source}");

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }

    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        let message = report
            .iter()
            .map(|(path, error)| {
                let path = path.to_string();

                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{path}: {error}")
                }
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::bad_request(message)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            success: false,
            message: self.message,
        }));
    }
}

/// Renders failures salvo raises itself, such as unparseable bodies or
/// unknown routes, as the JSON failure envelope.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(json_error_catcher)
}

#[handler]
async fn json_error_catcher(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res
        .status_code
        .filter(|status| status.is_client_error() || status.is_server_error())
    else {
        return;
    };

    let message = match &res.body {
        ResBody::None => status.canonical_reason().unwrap_or("Request failed").to_string(),
        ResBody::Error(error) => error.detail.clone().unwrap_or_else(|| error.brief.clone()),
        _ => return,
    };

    res.render(ApiError::new(status, message));
    ctrl.skip_rest();
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::UNAUTHORIZED, "Missing or invalid bearer token"),
            (StatusCode::FORBIDDEN, "Role not permitted"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorResponse::to_schema(components)),
            );
        }
    }
}
