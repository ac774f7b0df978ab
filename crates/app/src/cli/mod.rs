use clap::{Parser, Subcommand};

mod book;
mod db;
mod token;
mod user;

#[derive(Debug, Parser)]
#[command(name = "bookstore-app", about = "Bookstore CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Token(token::TokenCommand),
    Book(book::BookCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Book(command) => book::run(command).await,
        }
    }
}
