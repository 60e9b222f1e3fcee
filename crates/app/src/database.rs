//! Database connection management

use sqlx::{PgPool, Postgres, Row, Transaction, migrate::MigrateError, postgres::PgRow};
use storefront::prices::Price;

/// Shared database handle used by repositories.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply any pending embedded migrations.
///
/// # Errors
///
/// Returns an error if a migration fails or the history is inconsistent.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Convert a price to the signed `BIGINT` it is stored as.
pub(crate) fn price_to_i64(price: Price) -> Result<i64, sqlx::Error> {
    i64::try_from(price.to_minor_units()).map_err(|e| sqlx::Error::ColumnDecode {
        index: "price".to_string(),
        source: Box::new(e),
    })
}

/// Read a `BIGINT` price column, rejecting negative amounts.
pub(crate) fn price_from_row(row: &PgRow, column: &str) -> sqlx::Result<Price> {
    let minor: i64 = row.try_get(column)?;

    u64::try_from(minor)
        .map(Price::from_minor)
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

/// Read a `BIGINT` count column into a `u32`.
pub(crate) fn u32_from_row(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i64 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
