use clap::{Args, Subcommand};
use rentreturn_app::{
    database::{self, Db},
    domain::users::{PgUsersService, records::UserRecord},
};

mod create;
mod review;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register an account
    Create(create::CreateUserArgs),

    /// Set a renter's KYC status
    Kyc(review::ReviewArgs),

    /// Set a vendor's verification status
    Verify(review::ReviewArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Kyc(args) => review::run_kyc(args).await,
        UserSubcommand::Verify(args) => review::run_verify(args).await,
    }
}

async fn users_service(database_url: &str) -> Result<PgUsersService, String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(PgUsersService::new(Db::new(pool)))
}

fn print_user(user: &UserRecord) {
    println!("user_uuid: {}", user.uuid);
    println!("name: {}", user.name);
    println!("email: {}", user.email);
    println!("role: {}", user.role);
    println!("kyc_status: {}", user.kyc_status);
    println!("verification_status: {}", user.verification_status);
}
