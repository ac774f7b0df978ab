//! Orders errors.

use thiserror::Error;

use crate::domain::books::{BooksServiceError, records::BookId};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("book catalog unavailable")]
    CatalogUnavailable(#[source] BooksServiceError),

    #[error("order history unavailable")]
    DataUnavailable(#[source] sqlx::Error),

    #[error("book {0} not found")]
    BookNotFound(BookId),

    #[error("price mismatch for book {0}")]
    PriceMismatch(BookId),

    #[error("total amount mismatch: submitted {submitted}, computed {computed}")]
    TotalAmountMismatch { submitted: u64, computed: u64 },

    #[error("invalid quantity for book {0}")]
    InvalidQuantity(BookId),

    #[error("order has no items")]
    EmptyOrder,

    #[error("order amount overflow")]
    AmountOverflow,

    #[error("failed to persist order")]
    PersistenceFailure(#[source] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum OrdersStoreError {
    /// A write failed and the transaction was rolled back.
    #[error("order persistence failed")]
    Persistence(#[source] sqlx::Error),

    #[error("orders storage unavailable")]
    Unavailable(#[source] sqlx::Error),
}

impl From<OrdersStoreError> for OrdersServiceError {
    fn from(error: OrdersStoreError) -> Self {
        match error {
            OrdersStoreError::Persistence(source) => Self::PersistenceFailure(source),
            OrdersStoreError::Unavailable(source) => Self::DataUnavailable(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_persistence_maps_to_persistence_failure() {
        let error =
            OrdersServiceError::from(OrdersStoreError::Persistence(sqlx::Error::PoolClosed));

        assert!(matches!(error, OrdersServiceError::PersistenceFailure(_)));
    }

    #[test]
    fn store_unavailable_maps_to_data_unavailable() {
        let error =
            OrdersServiceError::from(OrdersStoreError::Unavailable(sqlx::Error::PoolTimedOut));

        assert!(matches!(error, OrdersServiceError::DataUnavailable(_)));
    }

    #[test]
    fn total_mismatch_message_names_both_amounts() {
        let error = OrdersServiceError::TotalAmountMismatch {
            submitted: 20_000,
            computed: 5_000,
        };

        assert_eq!(
            error.to_string(),
            "total amount mismatch: submitted 20000, computed 5000"
        );
    }
}
