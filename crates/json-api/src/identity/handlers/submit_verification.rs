//! Submit Verification Handler

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
        models::{DocumentSubmission, VerificationEnvelope},
    },
    state::State,
};

/// Submit Verification Handler
///
/// Uploads the vendor's business document and puts the vendor back in the
/// pending verification queue, e.g. after a rejection.
#[endpoint(
    tags("identity"),
    summary = "Submit Vendor Document",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 200, description = "Document submitted, review pending"),
        (status_code = 400, description = "Invalid document image"),
        (status_code = 409, description = "Vendor is already verified"),
        (status_code = 502, description = "Document upload failed"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<DocumentSubmission>,
    depot: &mut Depot,
) -> Result<Json<VerificationEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let vendor = depot.user_with_role(Role::Vendor)?;
    let document = EvidenceImage::try_from(json.into_inner())?;

    let status = state
        .app
        .identity
        .submit_document(
            vendor,
            DocumentKind::Verification,
            document,
            Timestamp::now(),
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(status.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use rentreturn_app::{
        domain::{
            identity::{
                IdentityServiceError, MockIdentityService,
                records::{IdentityDocument, IdentityStatus},
            },
            users::records::ReviewStatus,
        },
        storage::StorageError,
    };

    use crate::test_helpers::{identity_service, make_user};

    use super::*;

    fn route() -> Router {
        Router::with_path("vendor/verification").post(handler)
    }

    fn body() -> serde_json::Value {
        json!({
            "document": { "content_type": "image/png", "data": "iVBORw0K" }
        })
    }

    #[tokio::test]
    async fn test_vendor_document_requeues_verification() -> TestResult {
        let vendor = make_user(Role::Vendor);
        let user_uuid = vendor.uuid;

        let mut identity = MockIdentityService::new();

        identity
            .expect_submit_document()
            .once()
            .withf(|_, kind, document, _| {
                *kind == DocumentKind::Verification && document.content_type == "image/png"
            })
            .return_once(move |_, kind, _, now| {
                Ok(IdentityStatus {
                    kind,
                    status: ReviewStatus::Pending,
                    document: Some(IdentityDocument {
                        user_uuid,
                        kind,
                        document_url: "https://images.test/vendor-1.png".to_string(),
                        submitted_at: now,
                    }),
                })
            });

        let response: VerificationEnvelope =
            TestClient::post("http://example.com/vendor/verification")
                .json(&body())
                .send(&identity_service(identity, vendor, route()))
                .await
                .take_json()
                .await?;

        assert_eq!(response.verification.status, "pending");
        assert!(response.verification.submitted_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_document_as_renter_returns_403() -> TestResult {
        let mut identity = MockIdentityService::new();

        identity.expect_submit_document().never();

        let res = TestClient::post("http://example.com/vendor/verification")
            .json(&body())
            .send(&identity_service(identity, make_user(Role::User), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_vendor_document_upload_failure_returns_502() -> TestResult {
        let mut identity = MockIdentityService::new();

        identity.expect_submit_document().once().return_once(|_, _, _, _| {
            Err(IdentityServiceError::from(StorageError::Rejected {
                status: 503,
                message: "upload unavailable".to_string(),
            }))
        });

        let res = TestClient::post("http://example.com/vendor/verification")
            .json(&body())
            .send(&identity_service(identity, make_user(Role::Vendor), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }
}
