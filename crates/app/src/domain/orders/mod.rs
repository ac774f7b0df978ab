//! Orders

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod store;
pub mod validation;

pub use errors::{OrdersServiceError, OrdersStoreError};
pub use service::*;
pub use store::{OrdersStore, PgOrdersStore};
pub use validation::{OrderValidator, ValidatedOrder};
