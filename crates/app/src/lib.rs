//! Bookstore domain services and persistence.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod pagination;

#[cfg(test)]
mod test;
