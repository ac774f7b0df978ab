//! Orders Repository

use jiff::Timestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{amount_to_i64, epoch_millis, try_get_amount, try_get_millis},
    domain::{
        orders::records::{OrderId, OrderRecord, OrderStatus},
        users::records::UserId,
    },
    pagination::Page,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDERS_BY_USER_SQL: &str = include_str!("../sql/get_orders_by_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
        total_amount: u64,
        now: Timestamp,
    ) -> Result<OrderId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_ORDER_SQL)
            .bind(user_id.into_i64())
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .bind(OrderStatus::New.as_str())
            .bind(epoch_millis(now))
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::from_i64(id))
    }

    pub(crate) async fn get_orders_by_user(
        &self,
        pool: &PgPool,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDERS_BY_USER_SQL)
            .bind(user_id.into_i64())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            total_amount: try_get_amount(row, "total_amount")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: try_get_millis(row, "created_at")?,
            updated_at: try_get_millis(row, "updated_at")?,
        })
    }
}
