//! Product Models

use std::collections::BTreeMap;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rentreturn_app::domain::products::records::{ProductRecord, ProductSummary};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// The vendor who listed the product
    pub vendor_uuid: Uuid,

    pub vendor_name: String,

    /// Vendor rating between 0 and 5
    pub vendor_rating: String,

    pub name: String,

    pub description: String,

    /// One of `electronics`, `fashion`, `appliances` or `sports`
    pub category: String,

    pub image_url: Option<String>,

    /// Daily price as a decimal string
    pub price_per_day: String,

    /// Deposit added once to every rental total
    pub refundable_deposit: String,

    /// One of `available`, `rented` or `maintenance`
    pub status: String,

    pub specifications: BTreeMap<String, String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into_uuid(),
            vendor_uuid: product.vendor_uuid.into_uuid(),
            vendor_name: product.vendor_name,
            vendor_rating: product.vendor_rating.to_string(),
            name: product.name,
            description: product.description,
            category: product.category.to_string(),
            image_url: product.image_url,
            price_per_day: product.price_per_day.to_string(),
            refundable_deposit: product.refundable_deposit.to_string(),
            status: product.status.to_string(),
            specifications: product.specifications,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// The product fields embedded in rental responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub uuid: Uuid,
    pub vendor_name: String,
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub price_per_day: String,
    pub refundable_deposit: String,
    pub status: String,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        ProductSummaryResponse {
            uuid: product.uuid.into_uuid(),
            vendor_name: product.vendor_name,
            name: product.name,
            category: product.category.to_string(),
            image_url: product.image_url,
            price_per_day: product.price_per_day.to_string(),
            refundable_deposit: product.refundable_deposit.to_string(),
            status: product.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductEnvelope {
    pub success: bool,
    pub product: ProductResponse,
}

impl From<ProductRecord> for ProductEnvelope {
    fn from(product: ProductRecord) -> Self {
        Self {
            success: true,
            product: product.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsEnvelope {
    pub success: bool,
    pub products: Vec<ProductResponse>,
}

impl FromIterator<ProductRecord> for ProductsEnvelope {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(products: I) -> Self {
        Self {
            success: true,
            products: products.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDeletedResponse {
    pub success: bool,
    pub message: String,
}
