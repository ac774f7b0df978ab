//! Book Handlers

pub(crate) mod index;
