//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{books::records::BookId, users::records::UserId},
    ids::TypedId,
};

/// Order Id
pub type OrderId = TypedId<OrderRecord>;

/// Order Item Id
pub type OrderItemId = TypedId<OrderItemRecord>;

/// Order lifecycle status. Orders are only ever created as `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    New,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "NEW" => Ok(Self::New),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order header. `total_amount` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order line item with the unit price captured at order time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub book_id: BookId,
    pub quantity: u32,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order header together with its line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithItems {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}
