//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    domain::{
        orders::{
            data::{NewOrder, PlacedOrder},
            errors::OrdersServiceError,
            records::OrderWithItems,
            store::OrdersStore,
            validation::OrderValidator,
        },
        users::records::UserId,
    },
    pagination::Page,
};

/// Validates orders against the catalog before handing them to the store.
#[derive(Clone)]
pub struct ValidatingOrdersService {
    validator: OrderValidator,
    store: Arc<dyn OrdersStore>,
}

impl fmt::Debug for ValidatingOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingOrdersService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl ValidatingOrdersService {
    #[must_use]
    pub fn new(validator: OrderValidator, store: Arc<dyn OrdersStore>) -> Self {
        Self { validator, store }
    }
}

#[async_trait]
impl OrdersService for ValidatingOrdersService {
    async fn insert_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError> {
        let user_id = order.user_id;
        let validated = self.validator.validate(order).await?;

        let placed = self.store.insert_order(&validated).await?;

        info!(%user_id, order_id = %placed.id, "order placed");

        Ok(placed)
    }

    async fn get_orders_by_user_id(
        &self,
        user_id: UserId,
        page_index: i64,
        page_size: i64,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError> {
        let page = Page::new(page_index, page_size);

        debug!(%user_id, limit = page.limit, offset = page.offset, "loading order history");

        self.store
            .get_orders_by_user(user_id, page)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validates the order against current catalog prices and persists it
    /// atomically with status `NEW`.
    async fn insert_order(&self, order: NewOrder) -> Result<PlacedOrder, OrdersServiceError>;

    /// A user's order history, newest first. Non-positive paging arguments fall
    /// back to the first page of ten.
    async fn get_orders_by_user_id(
        &self,
        user_id: UserId,
        page_index: i64,
        page_size: i64,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError>;
}
