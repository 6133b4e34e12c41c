use clap::Args;
use jiff::Timestamp;
use rentreturn_app::{auth::ApiTokenMetadata, domain::users::records::UserUuid};

use super::Services;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// Account whose tokens should be listed
    #[arg(long)]
    user_uuid: UserUuid,
}

pub(crate) async fn run(services: &Services, args: ListTokensArgs) -> Result<(), String> {
    let tokens = services
        .auth
        .list_api_tokens(args.user_uuid)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
        return Ok(());
    }

    let now = Timestamp::now();

    for token in &tokens {
        println!("{}", describe(token, now));
    }

    Ok(())
}

fn describe(token: &ApiTokenMetadata, now: Timestamp) -> String {
    let state = match (token.revoked_at, token.expires_at) {
        (Some(revoked_at), _) => format!("revoked {revoked_at}"),
        (None, Some(expires_at)) if expires_at <= now => format!("expired {expires_at}"),
        (None, Some(expires_at)) => format!("active until {expires_at}"),
        (None, None) => "active".to_string(),
    };

    let last_used = token
        .last_used_at
        .map_or_else(|| "never".to_string(), |at| at.to_string());

    format!(
        "{} v{} created {} last used {last_used} {state}",
        token.uuid,
        token.version.as_i16(),
        token.created_at
    )
}
