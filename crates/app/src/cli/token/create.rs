use bookstore_app::{auth::PgAuthService, database};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Email of the user that should own the token
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user_id = super::user_id_for_email(pool.clone(), &args.email).await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(user_id)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_id: {}", issued.metadata.id);
    println!("user: {} ({user_id})", args.email);
    println!("api_token: {}", issued.token);
    println!("send it as `Authorization: Bearer <api_token>`; it is only shown once");

    Ok(())
}
