//! App Context

use std::sync::Arc;

use storefront::pricing::PricingPolicy;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        fulfillment::{FulfillmentService, PgFulfillmentService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
    payments::{PayPalClient, PayPalConfig, PaymentProviderError, PaymentsService, PgPaymentsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build payment client")]
    Payments(#[source] PaymentProviderError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub users: Arc<dyn UsersService>,
    pub orders: Arc<dyn OrdersService>,
    pub fulfillment: Arc<dyn FulfillmentService>,
    pub payments: Arc<dyn PaymentsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting, migrating or building the payment
    /// client fails.
    pub async fn from_database_url(
        url: &str,
        pricing: PricingPolicy,
        paypal: PayPalConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool);
        let provider = PayPalClient::new(paypal).map_err(AppInitError::Payments)?;
        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        Ok(Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                Arc::clone(&products),
                pricing,
            )),
            fulfillment: Arc::new(PgFulfillmentService::new(db.clone())),
            payments: Arc::new(PgPaymentsService::new(db.clone(), Arc::new(provider))),
            auth: Arc::new(PgAuthService::new(db)),
            products,
        })
    }
}
