//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        identity::{IdentityService, PgIdentityService},
        products::{PgProductsService, ProductsService},
        rentals::{PgRentalsService, RentalsService},
        users::{PgUsersService, UsersService},
    },
    payments::{StripeClient, StripeConfig},
    storage::{CloudinaryClient, CloudinaryConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Third-party adapters the rentals and identity services talk to.
#[derive(Debug, Clone)]
pub struct Integrations {
    pub stripe: StripeConfig,
    pub cloudinary: CloudinaryConfig,

    /// ISO currency code payment intents are opened in.
    pub currency: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub identity: Arc<dyn IdentityService>,
    pub products: Arc<dyn ProductsService>,
    pub rentals: Arc<dyn RentalsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL, applying any pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_url(
        url: &str,
        integrations: Integrations,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool.clone());
        let images = Arc::new(CloudinaryClient::new(integrations.cloudinary));

        Ok(Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            identity: Arc::new(PgIdentityService::new(db.clone(), images.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            rentals: Arc::new(PgRentalsService::new(
                db,
                Arc::new(StripeClient::new(integrations.stripe)),
                images,
                integrations.currency,
            )),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
