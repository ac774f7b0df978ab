//! Database connection management

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{
    PgPool, Postgres, Row as _, Transaction, migrate::MigrateError, postgres::PgRow, query,
};

/// Primary and read-replica connection pools.
///
/// Writes and authoritative reads (order placement, price lookups) go to the
/// primary. History and catalog listing reads go to the replica.
#[derive(Debug, Clone)]
pub struct Db {
    primary: PgPool,
    replica: PgPool,
}

impl Db {
    /// Use a single pool for both reads and writes.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            primary: pool.clone(),
            replica: pool,
        }
    }

    #[must_use]
    pub fn with_replica(primary: PgPool, replica: PgPool) -> Self {
        Self { primary, replica }
    }

    #[must_use]
    pub fn primary(&self) -> &PgPool {
        &self.primary
    }

    #[must_use]
    pub fn replica(&self) -> &PgPool {
        &self.replica
    }

    /// Begin a transaction on the primary.
    ///
    /// # Errors
    ///
    /// Returns an error when no connection can be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.primary.begin().await
    }
}

/// Reachability of the store that orders are written to.
#[automock]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round-trips a trivial query on the primary.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl DatabaseHealth for Db {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(&self.primary).await?;

        Ok(())
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

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Milliseconds since the Unix epoch, as stored in `created_at`/`updated_at` columns.
pub(crate) fn epoch_millis(timestamp: Timestamp) -> i64 {
    timestamp.as_millisecond()
}

/// Decode a millisecond column back into a [`Timestamp`].
pub(crate) fn try_get_millis(row: &PgRow, col: &str) -> sqlx::Result<Timestamp> {
    let millis: i64 = row.try_get(col)?;

    Timestamp::from_millisecond(millis).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Decode a non-negative minor-unit amount column.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> sqlx::Result<u64> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

/// Encode a minor-unit amount for a `BIGINT` column.
pub(crate) fn amount_to_i64(amount: u64, col: &str) -> sqlx::Result<i64> {
    i64::try_from(amount).map_err(|e| sqlx::Error::Encode(format!("{col}: {e}").into()))
}
