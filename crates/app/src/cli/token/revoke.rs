use clap::Args;
use uuid::Uuid;

use super::Services;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// Token to revoke, as printed by `token list`
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(services: &Services, args: RevokeTokenArgs) -> Result<(), String> {
    let revoked = services
        .auth
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was not active", args.token_uuid);
    }

    Ok(())
}
