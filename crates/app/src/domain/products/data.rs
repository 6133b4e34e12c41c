//! Products Data

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::products::records::{ProductCategory, ProductStatus, ProductUuid};

const NAME_CHARS: std::ops::RangeInclusive<usize> = 2..=160;
const DESCRIPTION_MAX_CHARS: usize = 2000;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub price_per_day: Decimal,
    pub refundable_deposit: Decimal,
    pub specifications: BTreeMap<String, String>,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub price_per_day: Decimal,
    pub refundable_deposit: Decimal,
    /// Vendors may move a product between `available` and `maintenance`.
    /// `None` keeps the current status.
    pub status: Option<ProductStatus>,
    pub specifications: BTreeMap<String, String>,
}

/// Public catalog filter. `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<ProductCategory>,
    pub status: Option<ProductStatus>,
}

impl NewProduct {
    /// Check listing fields before they reach storage.
    ///
    /// # Errors
    ///
    /// Returns a description of the first field that is out of range.
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_listing(
            &self.name,
            &self.description,
            self.price_per_day,
            self.refundable_deposit,
        )
    }
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns a description of the first field that is out of range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.status == Some(ProductStatus::Rented) {
            return Err("status rented is set by the rental lifecycle");
        }

        validate_listing(
            &self.name,
            &self.description,
            self.price_per_day,
            self.refundable_deposit,
        )
    }
}

fn validate_listing(
    name: &str,
    description: &str,
    price_per_day: Decimal,
    refundable_deposit: Decimal,
) -> Result<(), &'static str> {
    if !NAME_CHARS.contains(&name.trim().chars().count()) {
        return Err("name must be between 2 and 160 characters");
    }

    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err("description must be at most 2000 characters");
    }

    if price_per_day <= Decimal::ZERO {
        return Err("price per day must be positive");
    }

    if refundable_deposit < Decimal::ZERO {
        return Err("refundable deposit cannot be negative");
    }

    Ok(())
}
