//! Submit KYC Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::JsonBody, prelude::*};

use rentreturn_app::{
    domain::{identity::records::DocumentKind, users::records::Role},
    storage::EvidenceImage,
};

use crate::{
    errors::ApiError,
    extensions::*,
    identity::{
        errors::into_api_error,
        models::{DocumentSubmission, KycEnvelope},
    },
    state::State,
};

/// Submit KYC Handler
///
/// Uploads the renter's identity document and queues it for review. Renters
/// may open rentals only once a superadmin approves it.
#[endpoint(
    tags("identity"),
    summary = "Submit KYC Document",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Document submitted, review pending"),
        (status_code = 400, description = "Invalid document image"),
        (status_code = 409, description = "KYC is already approved"),
        (status_code = 502, description = "Document upload failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<DocumentSubmission>,
    depot: &mut Depot,
) -> Result<Json<KycEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let renter = depot.user_with_role(Role::User)?;
    let document = EvidenceImage::try_from(json.into_inner())?;

    let status = state
        .app
        .identity
        .submit_document(renter, DocumentKind::Kyc, document, Timestamp::now())
        .await
        .map_err(into_api_error)?;

    Ok(Json(status.into()))
}
