//! Errors

use bookstore_app::domain::orders::OrdersServiceError;
use salvo::http::StatusError;
use tracing::error;

/// Whether the order was refused by validation rather than by a failing dependency.
pub(super) fn is_rejection(error: &OrdersServiceError) -> bool {
    matches!(
        error,
        OrdersServiceError::BookNotFound(_)
            | OrdersServiceError::PriceMismatch(_)
            | OrdersServiceError::TotalAmountMismatch { .. }
            | OrdersServiceError::InvalidQuantity(_)
            | OrdersServiceError::EmptyOrder
            | OrdersServiceError::AmountOverflow
    )
}

pub(super) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::BookNotFound(book_id) => {
            StatusError::bad_request().brief(format!("Book {book_id} not found"))
        }
        OrdersServiceError::PriceMismatch(book_id) => {
            StatusError::bad_request().brief(format!("Price for book {book_id} has changed"))
        }
        OrdersServiceError::TotalAmountMismatch { .. } => {
            StatusError::bad_request().brief("Total amount does not match line items")
        }
        OrdersServiceError::InvalidQuantity(book_id) => StatusError::bad_request()
            .brief(format!("Quantity for book {book_id} must be positive")),
        OrdersServiceError::EmptyOrder => {
            StatusError::bad_request().brief("Order must contain at least one item")
        }
        OrdersServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Order amount is out of range")
        }
        OrdersServiceError::CatalogUnavailable(source) => {
            error!("failed to look up book prices: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::DataUnavailable(source) => {
            error!("failed to read orders: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::PersistenceFailure(source) => {
            error!("failed to persist order: {source}");

            StatusError::internal_server_error()
        }
    }
}
