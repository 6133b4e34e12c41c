//! Rental request bodies.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use garde::Validate;
use jiff::civil::Date;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rentreturn_app::{
    domain::{
        products::records::ProductUuid,
        rentals::data::{NewRental, RentalDays, ReturnRejection, ReturnRequest},
    },
    storage::EvidenceImage,
};

use crate::{errors::ApiError, rentals::errors::into_api_error};

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct CreateRentalRequest {
    #[garde(skip)]
    pub product_uuid: Uuid,

    /// First rental day, `YYYY-MM-DD`
    #[salvo(schema(value_type = String))]
    #[garde(skip)]
    pub start_date: Date,

    #[garde(range(min = 1, max = 60))]
    pub days: i64,

    #[garde(length(chars, min = 5, max = 255))]
    pub delivery_address: String,

    #[garde(length(chars, min = 6, max = 20))]
    pub contact_phone: String,
}

impl TryFrom<CreateRentalRequest> for NewRental {
    type Error = ApiError;

    fn try_from(request: CreateRentalRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        Ok(NewRental {
            product_uuid: ProductUuid::from_uuid(request.product_uuid),
            start_date: request.start_date,
            days: RentalDays::try_from(request.days).map_err(into_api_error)?,
            delivery_address: request.delivery_address,
            contact_phone: request.contact_phone,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct EvidenceImageBody {
    /// MIME type, e.g. `image/jpeg`
    #[garde(custom(image_mime_type))]
    pub content_type: String,

    /// Base64 image bytes, optionally as a `data:` URI
    #[garde(length(min = 1))]
    pub data: String,
}

fn image_mime_type(value: &str, _context: &()) -> garde::Result {
    match value.split_once('/') {
        Some(("image", subtype)) if !subtype.is_empty() => Ok(()),
        _ => Err(garde::Error::new("must be an image MIME type")),
    }
}

impl EvidenceImageBody {
    pub(crate) fn decode(self) -> Result<EvidenceImage, ApiError> {
        let encoded = match self.data.split_once(";base64,") {
            Some((prefix, encoded)) if prefix.starts_with("data:") => encoded,
            _ => self.data.as_str(),
        };

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|_ignored| ApiError::bad_request("image data is not valid base64"))?;

        Ok(EvidenceImage {
            bytes,
            content_type: self.content_type,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct ReturnRequestBody {
    #[garde(length(chars, min = 1, max = 1000))]
    pub note: String,

    #[garde(dive)]
    pub image: EvidenceImageBody,
}

impl TryFrom<ReturnRequestBody> for ReturnRequest {
    type Error = ApiError;

    fn try_from(body: ReturnRequestBody) -> Result<Self, Self::Error> {
        body.validate()?;

        Ok(ReturnRequest {
            note: body.note,
            image: body.image.decode()?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct RejectReturnRequest {
    /// A known reason (`damaged`, `missing_accessories`, `not_returned`,
    /// `wrong_item`) or free text
    #[garde(length(chars, min = 1, max = 120))]
    pub reason: String,

    #[serde(default)]
    #[garde(inner(length(chars, max = 1000)))]
    pub note: Option<String>,
}

impl TryFrom<RejectReturnRequest> for ReturnRejection {
    type Error = ApiError;

    fn try_from(request: RejectReturnRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        ReturnRejection::parse(&request.reason, request.note).map_err(into_api_error)
    }
}

#[cfg(test)]
mod tests {
    use rentreturn_app::domain::rentals::records::RejectionReason;
    use salvo::http::StatusCode;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn return_body(data: &str, content_type: &str) -> Result<ReturnRequestBody, serde_json::Error> {
        serde_json::from_value(json!({
            "note": "Returned with case",
            "image": { "content_type": content_type, "data": data }
        }))
    }

    #[test]
    fn create_request_rejects_out_of_range_days() -> TestResult {
        let request: CreateRentalRequest = serde_json::from_value(json!({
            "product_uuid": Uuid::now_v7(),
            "start_date": "2024-06-01",
            "days": 61,
            "delivery_address": "12 Harbour Road",
            "contact_phone": "+15550100"
        }))?;

        let error = NewRental::try_from(request).err();

        assert_eq!(error.map(|error| error.status()), Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn evidence_accepts_plain_and_data_uri_base64() -> TestResult {
        for data in ["iVBORw0K", "data:image/png;base64,iVBORw0K"] {
            let request = ReturnRequest::try_from(return_body(data, "image/png")?)
                .map_err(|error| error.message().to_string())?;

            assert_eq!(request.image.bytes, vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a]);
        }

        Ok(())
    }

    #[test]
    fn evidence_must_be_an_image() -> TestResult {
        let error = ReturnRequest::try_from(return_body("JVBERi0=", "application/pdf")?).err();

        assert_eq!(error.map(|error| error.status()), Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn invalid_base64_is_rejected() -> TestResult {
        let error = ReturnRequest::try_from(return_body("not base64!", "image/png")?).err();

        assert_eq!(
            error.map(|error| error.message().to_string()),
            Some("image data is not valid base64".to_string())
        );

        Ok(())
    }

    #[test]
    fn rejection_reason_key_is_recognised() -> TestResult {
        let request: RejectReturnRequest = serde_json::from_value(json!({
            "reason": "missing_accessories",
            "note": "Charger absent"
        }))?;

        let rejection =
            ReturnRejection::try_from(request).map_err(|error| error.message().to_string())?;

        assert_eq!(rejection.reason, RejectionReason::MissingAccessories);
        assert_eq!(rejection.note.as_deref(), Some("Charger absent"));

        Ok(())
    }
}
