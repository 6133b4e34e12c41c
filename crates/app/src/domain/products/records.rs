//! Product Records

use std::{collections::BTreeMap, fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{UnknownVariant, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Electronics,
    Fashion,
    Appliances,
    Sports,
}

impl ProductCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Appliances => "appliances",
            Self::Sports => "sports",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "electronics" => Ok(Self::Electronics),
            "fashion" => Ok(Self::Fashion),
            "appliances" => Ok(Self::Appliances),
            "sports" => Ok(Self::Sports),
            other => Err(UnknownVariant::new("product category", other)),
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability of a product.
///
/// `Rented` is owned by the rental lifecycle: a product is rented exactly
/// while one of its rentals is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
}

impl ProductStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "rented" => Ok(Self::Rented),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(UnknownVariant::new("product status", other)),
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub vendor_uuid: UserUuid,
    pub vendor_name: String,
    pub vendor_rating: Decimal,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub price_per_day: Decimal,
    pub refundable_deposit: Decimal,
    pub status: ProductStatus,
    pub specifications: BTreeMap<String, String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            uuid: self.uuid,
            vendor_name: self.vendor_name.clone(),
            name: self.name.clone(),
            category: self.category,
            image_url: self.image_url.clone(),
            price_per_day: self.price_per_day,
            refundable_deposit: self.refundable_deposit,
            status: self.status,
        }
    }
}

/// The product fields shown next to a rental.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub uuid: ProductUuid,
    pub vendor_name: String,
    pub name: String,
    pub category: ProductCategory,
    pub image_url: Option<String>,
    pub price_per_day: Decimal,
    pub refundable_deposit: Decimal,
    pub status: ProductStatus,
}
