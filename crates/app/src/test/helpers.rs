//! Test Helpers

use std::collections::BTreeMap;

use jiff::civil::date;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::{
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductCategory, ProductRecord, ProductUuid},
        },
        rentals::{
            RentalsService, RentalsServiceError,
            data::{CreatedRental, NewRental, RentalDays},
            records::RentalRecord,
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{KycStatus, Role, UserRecord, UserUuid, VerificationStatus},
        },
    },
    storage::EvidenceImage,
    test::TestContext,
};

pub(crate) fn new_user(role: Role) -> NewUser {
    let uuid = UserUuid::new();

    NewUser {
        uuid,
        name: format!("Test {}", role.as_str()),
        email: format!("{}@example.test", uuid.into_uuid().simple()),
        role,
    }
}

pub(crate) async fn create_verified_vendor(
    ctx: &TestContext,
) -> Result<UserRecord, UsersServiceError> {
    let vendor = ctx.users.create_user(new_user(Role::Vendor)).await?;

    ctx.users
        .set_verification_status(vendor.uuid, VerificationStatus::Approved)
        .await
}

pub(crate) async fn create_approved_renter(
    ctx: &TestContext,
) -> Result<UserRecord, UsersServiceError> {
    let renter = ctx.users.create_user(new_user(Role::User)).await?;

    ctx.users
        .set_kyc_status(renter.uuid, KycStatus::Approved)
        .await
}

pub(crate) fn new_product(price_per_day: Decimal, refundable_deposit: Decimal) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: "Trail bike".to_string(),
        description: "Hardtail with front suspension".to_string(),
        category: ProductCategory::Sports,
        image_url: None,
        price_per_day,
        refundable_deposit,
        specifications: BTreeMap::from([("frame".to_string(), "M".to_string())]),
    }
}

pub(crate) async fn create_listed_product(
    ctx: &TestContext,
    vendor: &UserRecord,
    price_per_day: Decimal,
    refundable_deposit: Decimal,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(vendor, new_product(price_per_day, refundable_deposit))
        .await
}

/// A rental starting 2024-06-01 for `days` days.
pub(crate) fn new_rental(product: ProductUuid, days: i64) -> NewRental {
    NewRental {
        product_uuid: product,
        start_date: date(2024, 6, 1),
        days: RentalDays::try_from(days).unwrap_or_else(|_| panic!("bad rental length {days}")),
        delivery_address: "12 Harbour Road".to_string(),
        contact_phone: "+15550100".to_string(),
    }
}

pub(crate) fn evidence_image() -> EvidenceImage {
    EvidenceImage {
        bytes: Uuid::now_v7().as_bytes().to_vec(),
        content_type: "image/jpeg".to_string(),
    }
}

pub(crate) async fn open_rental(
    ctx: &TestContext,
    renter: &UserRecord,
    product: &ProductRecord,
    days: i64,
) -> Result<CreatedRental, RentalsServiceError> {
    ctx.rentals
        .create_rental(renter, new_rental(product.uuid, days))
        .await
}

/// Settle the rental's payment intent and confirm it.
pub(crate) async fn activate_rental(
    ctx: &TestContext,
    renter: &UserRecord,
    created: &CreatedRental,
) -> Result<RentalRecord, RentalsServiceError> {
    ctx.payments.settle(&created.rental.payment_intent_id);

    ctx.rentals.confirm_rental(renter, created.rental.uuid).await
}
