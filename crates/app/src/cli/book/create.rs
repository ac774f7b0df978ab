use std::sync::Arc;

use bookstore_app::{
    database::{self, Db},
    domain::books::{BooksService, InMemoryBooksCache, PgBooksService, data::NewBook},
};
use clap::Args;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct CreateBookArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    author: String,

    #[arg(long)]
    isbn: String,

    /// Publication date (RFC 3339)
    #[arg(long)]
    published_date: String,

    /// Price in minor currency units
    #[arg(long)]
    price: u64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateBookArgs) -> Result<(), String> {
    let published_date = args
        .published_date
        .parse::<Timestamp>()
        .map_err(|error| format!("invalid published-date timestamp: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgBooksService::new(Db::new(pool), Arc::new(InMemoryBooksCache::default()));

    let book = service
        .create_book(NewBook {
            title: args.title,
            author: args.author,
            isbn: args.isbn,
            published_date,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create book: {error}"))?;

    println!("book_id: {}", book.id);
    println!("title: {}", book.title);
    println!("price: {}", book.price);

    Ok(())
}
