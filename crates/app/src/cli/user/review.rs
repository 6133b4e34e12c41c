use clap::Args;
use rentreturn_app::domain::users::{
    UsersService,
    records::{ReviewStatus, UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct ReviewArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Account to update
    #[arg(long)]
    user_uuid: UserUuid,

    /// One of unverified, pending, approved, rejected
    #[arg(long)]
    status: ReviewStatus,
}

pub(crate) async fn run_kyc(args: ReviewArgs) -> Result<(), String> {
    let service = super::users_service(&args.database_url).await?;

    let user = service
        .set_kyc_status(args.user_uuid, args.status)
        .await
        .map_err(|error| format!("failed to update kyc status: {error}"))?;

    super::print_user(&user);

    Ok(())
}

pub(crate) async fn run_verify(args: ReviewArgs) -> Result<(), String> {
    let service = super::users_service(&args.database_url).await?;

    let user = service
        .set_verification_status(args.user_uuid, args.status)
        .await
        .map_err(|error| format!("failed to update verification status: {error}"))?;

    super::print_user(&user);

    Ok(())
}
