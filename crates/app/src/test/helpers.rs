//! Test Helpers

use jiff::Timestamp;

use crate::{
    domain::{
        books::{BooksService, BooksServiceError, data::NewBook, records::BookRecord},
        users::{UsersService, UsersServiceError, data::NewUser, records::UserRecord},
    },
    test::TestContext,
};

pub(crate) async fn create_book(
    ctx: &TestContext,
    title: &str,
    price: u64,
) -> Result<BookRecord, BooksServiceError> {
    ctx.books
        .create_book(NewBook {
            title: title.to_string(),
            author: format!("Author of {title}"),
            isbn: format!("isbn-{title}"),
            published_date: Timestamp::UNIX_EPOCH,
            price,
        })
        .await
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            email: email.to_string(),
        })
        .await
}
