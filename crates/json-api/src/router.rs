//! App Router

use salvo::Router;

use crate::{auth, books, orders, users};

/// Catalog and registration routes are public; order routes require a bearer token.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("books").get(books::index::handler))
        .push(Router::with_path("users").post(users::create::handler))
        .push(
            Router::with_path("orders")
                .hoop(auth::middleware::handler)
                .get(orders::index::handler)
                .post(orders::create::handler),
        )
}
