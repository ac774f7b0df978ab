//! Order Data

use crate::domain::{
    books::records::BookId,
    orders::records::{OrderId, OrderStatus},
    users::records::UserId,
};

/// An order as submitted by a customer, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,

    /// Total the client computed, in minor currency units.
    pub total_amount: u64,

    pub items: Vec<NewOrderItem>,
}

/// A submitted line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub book_id: BookId,
    pub quantity: u32,

    /// Unit price the client saw, in minor currency units.
    pub price: u64,
}

/// Outcome of a successful order placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub status: OrderStatus,
}
