//! Book Data

use jiff::Timestamp;

/// New Book Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub published_date: Timestamp,
    pub price: u64,
}
