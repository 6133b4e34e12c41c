use clap::{Args, Subcommand};
use rentreturn_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::users::PgUsersService,
};

mod create;
mod list;
mod revoke;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a bearer token for an account
    Create(create::CreateTokenArgs),

    /// Show an account's tokens
    List(list::ListTokensArgs),

    /// Stop a token from authenticating
    Revoke(revoke::RevokeTokenArgs),
}

/// Auth and users services over one pool.
struct Services {
    auth: PgAuthService,
    users: PgUsersService,
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    let database_url = command
        .database_url
        .ok_or_else(|| "--database-url or DATABASE_URL is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let services = Services {
        auth: PgAuthService::new(pool.clone()),
        users: PgUsersService::new(Db::new(pool)),
    };

    match command.command {
        TokenSubcommand::Create(args) => create::run(&services, args).await,
        TokenSubcommand::List(args) => list::run(&services, args).await,
        TokenSubcommand::Revoke(args) => revoke::run(&services, args).await,
    }
}
