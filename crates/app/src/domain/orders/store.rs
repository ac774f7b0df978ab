//! Order persistence and history reads.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::warn;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::PlacedOrder,
            errors::OrdersStoreError,
            records::{OrderId, OrderItemRecord, OrderStatus, OrderWithItems},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            validation::ValidatedOrder,
        },
        users::records::UserId,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgOrdersStore {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgOrdersStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }

    async fn write_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &ValidatedOrder,
        now: Timestamp,
    ) -> Result<OrderId, sqlx::Error> {
        let order_id = self
            .orders_repository
            .create_order(tx, order.user_id(), order.total_amount(), now)
            .await?;

        for item in order.items() {
            self.items_repository
                .create_order_item(tx, order_id, item, now)
                .await?;
        }

        Ok(order_id)
    }
}

#[async_trait]
impl OrdersStore for PgOrdersStore {
    async fn insert_order(&self, order: &ValidatedOrder) -> Result<PlacedOrder, OrdersStoreError> {
        let mut tx = self.db.begin().await.map_err(OrdersStoreError::Persistence)?;

        match self.write_order(&mut tx, order, Timestamp::now()).await {
            Ok(order_id) => {
                tx.commit().await.map_err(OrdersStoreError::Persistence)?;

                Ok(PlacedOrder {
                    id: order_id,
                    status: OrderStatus::New,
                })
            }
            Err(source) => {
                if let Err(rollback_error) = tx.rollback().await {
                    warn!("failed to roll back order transaction: {rollback_error}");
                }

                Err(OrdersStoreError::Persistence(source))
            }
        }
    }

    async fn get_orders_by_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<OrderWithItems>, OrdersStoreError> {
        let orders = self
            .orders_repository
            .get_orders_by_user(self.db.replica(), user_id, page)
            .await
            .map_err(OrdersStoreError::Unavailable)?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<OrderId> = orders.iter().map(|order| order.id).collect();

        let items = self
            .items_repository
            .get_items_by_order_ids(self.db.replica(), &order_ids)
            .await
            .map_err(OrdersStoreError::Unavailable)?;

        let mut items_by_order: FxHashMap<OrderId, Vec<OrderItemRecord>> = FxHashMap::default();

        for item in items {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| OrderWithItems {
                items: items_by_order.remove(&order.id).unwrap_or_default(),
                order,
            })
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait OrdersStore: Send + Sync {
    /// Writes the order header and all of its items in one transaction.
    ///
    /// Nothing is persisted when any statement fails.
    async fn insert_order(&self, order: &ValidatedOrder) -> Result<PlacedOrder, OrdersStoreError>;

    /// A page of the user's orders, newest first, each with its items attached.
    async fn get_orders_by_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<OrderWithItems>, OrdersStoreError>;
}
