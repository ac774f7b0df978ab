use bookstore_app::domain::users::{PgUsersService, UsersService, records::UserId};
use clap::{Args, Subcommand};
use sqlx::PgPool;

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

/// API bearer tokens used by the JSON API.
#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(create::CreateTokenArgs),
    List(list::ListTokensArgs),
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}

async fn user_id_for_email(pool: PgPool, email: &str) -> Result<UserId, String> {
    PgUsersService::new(pool)
        .get_user_by_email(email)
        .await
        .map_err(|error| format!("failed to look up user: {error}"))?
        .map(|user| user.id)
        .ok_or_else(|| format!("no user with email {email}"))
}
