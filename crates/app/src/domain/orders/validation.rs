//! Order validation against the authoritative book catalog.

use std::{fmt, sync::Arc};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::domain::{
    books::{
        BooksService,
        records::{BookId, BookRecord},
    },
    orders::{
        data::{NewOrder, NewOrderItem},
        errors::OrdersServiceError,
    },
    users::records::UserId,
};

/// An order whose item prices match the catalog and whose total equals the sum
/// of its line subtotals.
///
/// Only [`OrderValidator`] can produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    order: NewOrder,
}

impl ValidatedOrder {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.order.user_id
    }

    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.order.total_amount
    }

    #[must_use]
    pub fn items(&self) -> &[NewOrderItem] {
        &self.order.items
    }

    /// Skip validation. Used to push rows the database itself will reject.
    #[cfg(test)]
    pub(crate) fn new_unchecked(order: NewOrder) -> Self {
        Self { order }
    }
}

#[derive(Clone)]
pub struct OrderValidator {
    books: Arc<dyn BooksService>,
}

impl fmt::Debug for OrderValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderValidator").finish_non_exhaustive()
    }
}

impl OrderValidator {
    #[must_use]
    pub fn new(books: Arc<dyn BooksService>) -> Self {
        Self { books }
    }

    /// Check every submitted price and the submitted total against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::CatalogUnavailable`] when the price lookup
    /// fails, otherwise the first validation failure encountered.
    pub async fn validate(&self, order: NewOrder) -> Result<ValidatedOrder, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let ids: Vec<BookId> = order
            .items
            .iter()
            .map(|item| item.book_id)
            .collect::<FxHashSet<_>>()
            .into_iter()
            .collect();

        let catalog = self
            .books
            .get_books_by_ids(&ids)
            .await
            .map_err(OrdersServiceError::CatalogUnavailable)?;

        check_against_catalog(&order, &catalog)?;

        Ok(ValidatedOrder { order })
    }
}

/// Largest quantity an `order_items.quantity` INTEGER column can hold.
const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// Largest amount a BIGINT money column can hold.
const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Walk the items in submission order, failing on the first missing book, price
/// mismatch, out-of-range quantity or overflow, then compare the accumulated total.
fn check_against_catalog(
    order: &NewOrder,
    catalog: &FxHashMap<BookId, BookRecord>,
) -> Result<(), OrdersServiceError> {
    let mut computed: u64 = 0;

    for item in &order.items {
        let book = catalog
            .get(&item.book_id)
            .ok_or(OrdersServiceError::BookNotFound(item.book_id))?;

        if item.price != book.price {
            return Err(OrdersServiceError::PriceMismatch(item.book_id));
        }

        if item.quantity == 0 || item.quantity > MAX_QUANTITY {
            return Err(OrdersServiceError::InvalidQuantity(item.book_id));
        }

        computed = item
            .price
            .checked_mul(u64::from(item.quantity))
            .and_then(|subtotal| computed.checked_add(subtotal))
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or(OrdersServiceError::AmountOverflow)?;
    }

    if computed != order.total_amount {
        return Err(OrdersServiceError::TotalAmountMismatch {
            submitted: order.total_amount,
            computed,
        });
    }

    Ok(())
}
