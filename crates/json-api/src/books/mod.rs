//! Books

mod handlers;

pub(crate) use handlers::*;
