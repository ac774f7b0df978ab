//! Order Items Repository

use jiff::Timestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{amount_to_i64, epoch_millis, try_get_amount, try_get_millis},
    domain::{
        books::records::BookId,
        orders::{
            data::NewOrderItem,
            records::{OrderId, OrderItemId, OrderItemRecord},
        },
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ITEMS_BY_ORDER_IDS_SQL: &str = include_str!("../sql/get_items_by_order_ids.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_id: OrderId,
        item: &NewOrderItem,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        // INTEGER column; the validator keeps quantities within i32.
        let quantity = i32::try_from(item.quantity)
            .map_err(|e| sqlx::Error::Encode(format!("quantity: {e}").into()))?;

        query(CREATE_ORDER_ITEM_SQL)
            .bind(order_id.into_i64())
            .bind(item.book_id.into_i64())
            .bind(quantity)
            .bind(amount_to_i64(item.price, "price")?)
            .bind(epoch_millis(now))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_items_by_order_ids(
        &self,
        pool: &PgPool,
        order_ids: &[OrderId],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let ids: Vec<i64> = order_ids.iter().copied().map(OrderId::into_i64).collect();

        query_as::<Postgres, OrderItemRecord>(GET_ITEMS_BY_ORDER_IDS_SQL)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        Ok(Self {
            id: OrderItemId::from_i64(row.try_get("id")?),
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            book_id: BookId::from_i64(row.try_get("book_id")?),
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            price: try_get_amount(row, "price")?,
            created_at: try_get_millis(row, "created_at")?,
            updated_at: try_get_millis(row, "updated_at")?,
        })
    }
}
