//! Products Repository

use std::collections::BTreeMap;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::{
    products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        records::{ProductCategory, ProductRecord, ProductStatus, ProductSummary, ProductUuid},
    },
    try_get_variant,
    users::records::{UserRecord, UserUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_VENDOR_PRODUCTS_SQL: &str = include_str!("sql/list_vendor_products.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const LOCK_VENDOR_PRODUCT_SQL: &str = include_str!("sql/lock_vendor_product.sql");
const SET_PRODUCT_STATUS_SQL: &str = include_str!("sql/set_product_status.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(ProductCategory::as_str))
            .bind(filter.status.map(ProductStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_vendor_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_VENDOR_PRODUCTS_SQL)
            .bind(vendor.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Lock a product for the rest of the transaction.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock a product owned by `vendor` for the rest of the transaction.
    pub(crate) async fn lock_vendor_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LOCK_VENDOR_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(vendor.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: &UserRecord,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(vendor.uuid.into_uuid())
            .bind(&vendor.name)
            .bind(product.name)
            .bind(product.description)
            .bind(product.category.as_str())
            .bind(product.image_url)
            .bind(product.price_per_day)
            .bind(product.refundable_deposit)
            .bind(Json(product.specifications))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
        product: ProductUuid,
        status: ProductStatus,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(vendor.into_uuid())
            .bind(update.name)
            .bind(update.description)
            .bind(update.category.as_str())
            .bind(update.image_url)
            .bind(update.price_per_day)
            .bind(update.refundable_deposit)
            .bind(status.as_str())
            .bind(Json(update.specifications))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_product_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        status: ProductStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PRODUCT_STATUS_SQL)
            .bind(product.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        vendor: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(vendor.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(specifications) =
            row.try_get::<Json<BTreeMap<String, String>>, _>("specifications")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            vendor_uuid: UserUuid::from_uuid(row.try_get("vendor_uuid")?),
            vendor_name: row.try_get("vendor_name")?,
            vendor_rating: row.try_get("vendor_rating")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: try_get_variant(row, "category")?,
            image_url: row.try_get("image_url")?,
            price_per_day: row.try_get("price_per_day")?,
            refundable_deposit: row.try_get("refundable_deposit")?,
            status: try_get_variant(row, "status")?,
            specifications,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Read the `product_*` columns of a rental join.
pub(crate) fn product_summary_from_row(row: &PgRow) -> sqlx::Result<ProductSummary> {
    Ok(ProductSummary {
        uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
        vendor_name: row.try_get("product_vendor_name")?,
        name: row.try_get("product_name")?,
        category: try_get_variant(row, "product_category")?,
        image_url: row.try_get("product_image_url")?,
        price_per_day: row.try_get("product_price_per_day")?,
        refundable_deposit: row.try_get("product_refundable_deposit")?,
        status: try_get_variant(row, "product_status")?,
    })
}
