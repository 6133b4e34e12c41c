use clap::Args;
use jiff::Timestamp;
use rentreturn_app::domain::users::{UsersService, records::UserUuid};

use super::Services;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Account the token authenticates as
    #[arg(long)]
    user_uuid: UserUuid,

    /// Expiry (RFC 3339); tokens never expire when omitted
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(services: &Services, args: CreateTokenArgs) -> Result<(), String> {
    if args.expires_at.is_some_and(|expires_at| expires_at <= Timestamp::now()) {
        return Err("--expires-at must be in the future".to_string());
    }

    let owner = services
        .users
        .get_user(args.user_uuid)
        .await
        .map_err(|error| format!("failed to load user {}: {error}", args.user_uuid))?;

    let issued = services
        .auth
        .issue_api_token(owner.uuid, args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("issued for {} <{}> as {}", owner.name, owner.email, owner.role);
    println!("token_uuid: {}", issued.metadata.uuid);

    if let Some(expires_at) = issued.metadata.expires_at {
        println!("expires_at: {expires_at}");
    }

    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
