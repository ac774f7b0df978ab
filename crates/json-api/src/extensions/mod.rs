//! Extension traits

mod depot;
mod paging;
mod result;
mod user;

pub(crate) use depot::DepotExt as _;
pub(crate) use paging::PagingParamExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use user::UserDepotExt as _;
