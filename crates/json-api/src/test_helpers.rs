//! Test helpers.

use std::sync::Arc;

use bookstore_app::{
    auth::MockAuthService,
    context::AppContext,
    database::MockDatabaseHealth,
    domain::{
        books::MockBooksService,
        orders::MockOrdersService,
        users::{MockUsersService, records::UserId},
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_ID: UserId = UserId::from_i64(1);

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_id(TEST_USER_ID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_books_mock() -> MockBooksService {
    let mut books = MockBooksService::new();

    books.expect_list_books().never();
    books.expect_get_books_by_ids().never();
    books.expect_create_book().never();

    books
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_insert_order().never();
    orders.expect_get_orders_by_user_id().never();

    orders
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user_by_email().never();

    users
}

fn strict_database_mock() -> MockDatabaseHealth {
    let mut database = MockDatabaseHealth::new();

    database.expect_ping().never();

    database
}

/// Services a handler test does not configure panic if they are called.
#[derive(Default)]
struct Mocks {
    books: Option<MockBooksService>,
    orders: Option<MockOrdersService>,
    users: Option<MockUsersService>,
    auth: Option<MockAuthService>,
    database: Option<MockDatabaseHealth>,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            books: Arc::new(self.books.unwrap_or_else(strict_books_mock)),
            orders: Arc::new(self.orders.unwrap_or_else(strict_orders_mock)),
            users: Arc::new(self.users.unwrap_or_else(strict_users_mock)),
            auth: Arc::new(self.auth.unwrap_or_else(strict_auth_mock)),
            database: Arc::new(self.database.unwrap_or_else(strict_database_mock)),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth: Some(auth),
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn books_service(books: MockBooksService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(
                Mocks {
                    books: Some(books),
                    ..Mocks::default()
                }
                .into_state(),
            ))
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(
                Mocks {
                    orders: Some(orders),
                    ..Mocks::default()
                }
                .into_state(),
            ))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn users_service(users: MockUsersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(
                Mocks {
                    users: Some(users),
                    ..Mocks::default()
                }
                .into_state(),
            ))
            .push(route),
    )
}

pub(crate) fn health_service(database: MockDatabaseHealth, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(
                Mocks {
                    database: Some(database),
                    ..Mocks::default()
                }
                .into_state(),
            ))
            .push(route),
    )
}
