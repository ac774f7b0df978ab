//! Create Order Handler

use std::sync::Arc;

use bookstore_app::domain::{
    books::records::BookId,
    orders::data::{NewOrder, NewOrderItem},
    users::records::UserId,
};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    observability::{OrderOutcome, observe_order},
    orders::errors::{into_status_error, is_rejection},
    state::State,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// Order total in minor currency units
    pub total_amount: u64,

    pub items: Vec<CreateOrderItemRequest>,
}

/// Create Order Item Request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderItemRequest {
    pub book_id: i64,

    pub quantity: u32,

    /// Unit price the customer was shown, in minor currency units
    pub price: u64,
}

impl CreateOrderRequest {
    fn into_new_order(self, user_id: UserId) -> NewOrder {
        NewOrder {
            user_id,
            total_amount: self.total_amount,
            items: self
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    book_id: BookId::from_i64(item.book_id),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        }
    }
}

/// Create Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderCreatedResponse {
    pub order_id: i64,

    pub status: String,
}

/// Create Order Handler
///
/// Validates the submitted prices and total against the catalog and places the
/// order for the authenticated user.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = 201, description = "Order placed"),
        (status_code = 400, description = "Order rejected by validation"),
        (status_code = 401, description = "Unauthorized"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderCreatedResponse>, StatusError> {
    let user_id = depot.user_id_or_401()?;
    let order = json.into_inner().into_new_order(user_id);

    let placed = match depot
        .obtain_or_500::<Arc<State>>()?
        .app
        .orders
        .insert_order(order)
        .await
    {
        Ok(placed) => placed,
        Err(error) => {
            observe_order(if is_rejection(&error) {
                OrderOutcome::Rejected
            } else {
                OrderOutcome::Failed
            });

            return Err(into_status_error(error));
        }
    };

    observe_order(OrderOutcome::Placed);

    res.status_code(StatusCode::CREATED);

    Ok(Json(OrderCreatedResponse {
        order_id: placed.id.into_i64(),
        status: placed.status.to_string(),
    }))
}
