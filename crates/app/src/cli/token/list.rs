use bookstore_app::{auth::PgAuthService, database};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email of the user whose tokens should be listed
    #[arg(long)]
    email: String,

    /// Hide revoked tokens
    #[arg(long)]
    active_only: bool,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user_id = super::user_id_for_email(pool.clone(), &args.email).await?;

    let tokens: Vec<_> = PgAuthService::new(pool)
        .list_api_tokens(user_id)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?
        .into_iter()
        .filter(|token| !args.active_only || token.revoked_at.is_none())
        .collect();

    if tokens.is_empty() {
        println!("no tokens found for {}", args.email);
        return Ok(());
    }

    for token in tokens {
        let state = token
            .revoked_at
            .map_or_else(|| "active".to_string(), |at| format!("revoked {at}"));

        println!("{}\tcreated {}\t{state}", token.id, token.created_at);
    }

    Ok(())
}
