//! Order History Handler

use std::sync::Arc;

use bookstore_app::domain::orders::records::{OrderItemRecord, OrderWithItems};
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub item_id: i64,

    pub book_id: i64,

    pub quantity: u32,

    /// Unit price captured when the order was placed, in minor currency units
    pub price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            item_id: item.id.into_i64(),
            book_id: item.book_id.into_i64(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub order_id: i64,

    /// Order total in minor currency units
    pub total_amount: u64,

    pub status: String,

    /// Milliseconds since the Unix epoch
    pub created_at: i64,

    /// Milliseconds since the Unix epoch
    pub updated_at: i64,

    pub items: Vec<OrderItemResponse>,
}

impl From<OrderWithItems> for OrderResponse {
    fn from(OrderWithItems { order, items }: OrderWithItems) -> Self {
        OrderResponse {
            order_id: order.id.into_i64(),
            total_amount: order.total_amount,
            status: order.status.to_string(),
            created_at: order.created_at.as_millisecond(),
            updated_at: order.updated_at.as_millisecond(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// The authenticated user's orders, newest first
    pub orders: Vec<OrderResponse>,
}

/// Order History Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page_index: QueryParam<String, false>,
    page_size: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user_id = depot.user_id_or_401()?;

    let orders = state
        .app
        .orders
        .get_orders_by_user_id(
            user_id,
            page_index.into_paging_value(),
            page_size.into_paging_value(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
