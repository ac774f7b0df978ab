use bookstore_app::{
    database,
    domain::users::{PgUsersService, UsersService, data::NewUser},
};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Login email
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(pool)
        .create_user(NewUser { email: args.email })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("email: {}", user.email);

    Ok(())
}
