//! Book Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Book Id
pub type BookId = TypedId<BookRecord>;

/// Book Record
///
/// `price` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_date: Timestamp,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
