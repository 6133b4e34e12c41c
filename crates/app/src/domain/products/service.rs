//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductStatus, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::{UserRecord, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_vendor_products(
        &self,
        vendor: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_vendor_products(&mut tx, vendor).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        vendor: &UserRecord,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if !vendor.can_list_products() {
            return Err(ProductsServiceError::VendorNotVerified);
        }

        product
            .validate()
            .map_err(ProductsServiceError::Validation)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, vendor, product)
            .await?;

        tx.commit().await?;

        tracing::info!(product = %created.uuid, vendor = %vendor.uuid, "product listed");

        Ok(created)
    }

    async fn update_product(
        &self,
        vendor: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate().map_err(ProductsServiceError::Validation)?;

        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_vendor_product(&mut tx, vendor, product)
            .await?;

        let status = match (current.status, update.status) {
            (unchanged, None) => unchanged,
            (ProductStatus::Rented, Some(requested)) if requested != ProductStatus::Rented => {
                return Err(ProductsServiceError::Rented);
            }
            (_, Some(requested)) => requested,
        };

        let updated = self
            .repository
            .update_product(&mut tx, vendor, product, status, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        vendor: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .lock_vendor_product(&mut tx, vendor, product)
            .await?;

        if current.status == ProductStatus::Rented {
            return Err(ProductsServiceError::Rented);
        }

        let rows_affected = self
            .repository
            .delete_product(&mut tx, vendor, product)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        tracing::info!(product = %product, vendor = %vendor, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// The public catalog, newest first.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Products owned by the given vendor, newest first.
    async fn list_vendor_products(
        &self,
        vendor: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// List a new product for a verified vendor.
    async fn create_product(
        &self,
        vendor: &UserRecord,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replace the listing fields of a product owned by `vendor`.
    async fn update_product(
        &self,
        vendor: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete a product owned by `vendor` together with its rental history.
    async fn delete_product(
        &self,
        vendor: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{
            products::records::ProductCategory,
            users::{UsersService, records::Role},
        },
        test::{
            TestContext,
            helpers::{create_verified_vendor, new_product, new_user},
        },
    };

    use super::*;

    fn update_from(product: &ProductRecord) -> ProductUpdate {
        ProductUpdate {
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category,
            image_url: product.image_url.clone(),
            price_per_day: product.price_per_day,
            refundable_deposit: product.refundable_deposit,
            status: None,
            specifications: product.specifications.clone(),
        }
    }

    #[tokio::test]
    async fn create_product_snapshots_vendor_identity() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = create_verified_vendor(&ctx).await?;

        let mut product = new_product(Decimal::from(20), Decimal::from(100));
        product.specifications = BTreeMap::from([("weight".to_string(), "2kg".to_string())]);

        let created = ctx.products.create_product(&vendor, product.clone()).await?;

        assert_eq!(created.uuid, product.uuid);
        assert_eq!(created.vendor_uuid, vendor.uuid);
        assert_eq!(created.vendor_name, vendor.name);
        assert_eq!(created.status, ProductStatus::Available);
        assert_eq!(created.specifications, product.specifications);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_requires_verified_vendor() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = ctx.users.create_user(new_user(Role::Vendor)).await?;

        let result = ctx
            .products
            .create_product(&vendor, new_product(Decimal::from(20), Decimal::ZERO))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::VendorNotVerified)),
            "expected VendorNotVerified, got {result:?}"
        );
        assert!(ctx.products.list_vendor_products(vendor.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_invalid_price() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = create_verified_vendor(&ctx).await?;

        let result = ctx
            .products
            .create_product(&vendor, new_product(Decimal::ZERO, Decimal::ZERO))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = create_verified_vendor(&ctx).await?;

        let mut bike = new_product(Decimal::from(20), Decimal::ZERO);
        bike.category = ProductCategory::Sports;

        let mut camera = new_product(Decimal::from(40), Decimal::ZERO);
        camera.category = ProductCategory::Electronics;

        ctx.products.create_product(&vendor, bike.clone()).await?;
        ctx.products.create_product(&vendor, camera).await?;

        let sports = ctx
            .products
            .list_products(ProductFilter {
                category: Some(ProductCategory::Sports),
                status: None,
            })
            .await?;

        let uuids: Vec<_> = sports.iter().map(|product| product.uuid).collect();

        assert_eq!(uuids, vec![bike.uuid]);
        assert_eq!(
            ctx.products.list_products(ProductFilter::default()).await?.len(),
            2
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_by_other_vendor_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_verified_vendor(&ctx).await?;
        let other = create_verified_vendor(&ctx).await?;

        let product = ctx
            .products
            .create_product(&owner, new_product(Decimal::from(20), Decimal::ZERO))
            .await?;

        let result = ctx
            .products
            .update_product(other.uuid, product.uuid, update_from(&product))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_moves_to_maintenance() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = create_verified_vendor(&ctx).await?;

        let product = ctx
            .products
            .create_product(&vendor, new_product(Decimal::from(20), Decimal::ZERO))
            .await?;

        let mut update = update_from(&product);
        update.name = "Renamed bike".to_string();
        update.status = Some(ProductStatus::Maintenance);

        let updated = ctx
            .products
            .update_product(vendor.uuid, product.uuid, update)
            .await?;

        assert_eq!(updated.name, "Renamed bike");
        assert_eq!(updated.status, ProductStatus::Maintenance);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_removes_owned_product() -> TestResult {
        let ctx = TestContext::new().await;
        let vendor = create_verified_vendor(&ctx).await?;

        let product = ctx
            .products
            .create_product(&vendor, new_product(Decimal::from(20), Decimal::ZERO))
            .await?;

        ctx.products.delete_product(vendor.uuid, product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
