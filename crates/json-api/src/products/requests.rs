//! Product request bodies.

use std::collections::BTreeMap;

use garde::Validate;
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use rentreturn_app::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::{ProductCategory, ProductStatus, ProductUuid},
};

use crate::errors::ApiError;

/// Listing fields accepted when a vendor creates or edits a product.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub(crate) struct ProductRequest {
    #[garde(length(chars, min = 2, max = 160))]
    pub name: String,

    #[serde(default)]
    #[garde(length(chars, max = 2000))]
    pub description: String,

    /// One of `electronics`, `fashion`, `appliances` or `sports`
    #[garde(skip)]
    pub category: String,

    #[serde(default)]
    #[garde(inner(length(max = 2048)))]
    pub image_url: Option<String>,

    #[salvo(schema(value_type = String))]
    #[garde(custom(positive))]
    pub price_per_day: Decimal,

    #[serde(default)]
    #[salvo(schema(value_type = String))]
    #[garde(custom(not_negative))]
    pub refundable_deposit: Decimal,

    /// `available` or `maintenance`; only honoured on update
    #[serde(default)]
    #[garde(skip)]
    pub status: Option<String>,

    #[serde(default)]
    #[garde(skip)]
    pub specifications: BTreeMap<String, String>,
}

fn positive(value: &Decimal, _context: &()) -> garde::Result {
    if *value <= Decimal::ZERO {
        return Err(garde::Error::new("must be greater than zero"));
    }

    Ok(())
}

fn not_negative(value: &Decimal, _context: &()) -> garde::Result {
    if *value < Decimal::ZERO {
        return Err(garde::Error::new("cannot be negative"));
    }

    Ok(())
}

impl ProductRequest {
    fn category(&self) -> Result<ProductCategory, ApiError> {
        self.category
            .parse()
            .map_err(|_ignored| ApiError::bad_request(format!("unknown category {:?}", self.category)))
    }

    pub(crate) fn into_new_product(self) -> Result<NewProduct, ApiError> {
        self.validate()?;

        Ok(NewProduct {
            uuid: ProductUuid::new(),
            category: self.category()?,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price_per_day: self.price_per_day,
            refundable_deposit: self.refundable_deposit,
            specifications: self.specifications,
        })
    }

    pub(crate) fn into_update(self) -> Result<ProductUpdate, ApiError> {
        self.validate()?;

        let status = self
            .status
            .as_deref()
            .map(str::parse::<ProductStatus>)
            .transpose()
            .map_err(|error| ApiError::bad_request(error.to_string()))?;

        Ok(ProductUpdate {
            category: self.category()?,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            price_per_day: self.price_per_day,
            refundable_deposit: self.refundable_deposit,
            status,
            specifications: self.specifications,
        })
    }
}
