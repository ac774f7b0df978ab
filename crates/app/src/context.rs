//! App Context

use std::{fmt, sync::Arc, time::Duration};

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, DatabaseHealth, Db},
    domain::{
        books::{BooksService, DEFAULT_BOOKS_CACHE_TTL, InMemoryBooksCache, PgBooksService},
        orders::{OrderValidator, OrdersService, PgOrdersStore, ValidatingOrdersService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to connect to read replica")]
    Replica(#[source] sqlx::Error),
}

/// Settings needed to wire the application services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,

    /// Read replica for history and catalog listing; the primary is used when unset.
    pub replica_database_url: Option<String>,

    pub books_cache_ttl: Duration,
}

impl AppSettings {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            replica_database_url: None,
            books_cache_ttl: DEFAULT_BOOKS_CACHE_TTL,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub books: Arc<dyn BooksService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub database: Arc<dyn DatabaseHealth>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let primary = database::connect(&settings.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let db = match settings.replica_database_url.as_deref() {
            Some(url) => {
                let replica = database::connect(url)
                    .await
                    .map_err(AppInitError::Replica)?;

                info!("using read replica for history and catalog reads");

                Db::with_replica(primary.clone(), replica)
            }
            None => Db::new(primary.clone()),
        };

        Ok(Self::from_db(
            db,
            primary,
            Arc::new(InMemoryBooksCache::new(settings.books_cache_ttl)),
        ))
    }

    fn from_db(db: Db, primary: sqlx::PgPool, cache: Arc<InMemoryBooksCache>) -> Self {
        let database: Arc<dyn DatabaseHealth> = Arc::new(db.clone());
        let books: Arc<dyn BooksService> = Arc::new(PgBooksService::new(db.clone(), cache));

        let orders = ValidatingOrdersService::new(
            OrderValidator::new(Arc::clone(&books)),
            Arc::new(PgOrdersStore::new(db)),
        );

        Self {
            books,
            orders: Arc::new(orders),
            users: Arc::new(PgUsersService::new(primary.clone())),
            auth: Arc::new(PgAuthService::new(primary)),
            database,
        }
    }
}
