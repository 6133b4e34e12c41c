use clap::Args;
use rentreturn_app::domain::users::{
    UsersService,
    data::NewUser,
    records::{Role, UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login email, unique case-insensitively
    #[arg(long)]
    email: String,

    /// One of user, vendor, admin, superadmin
    #[arg(long, default_value = "user")]
    role: Role,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.name.trim().is_empty() || !args.email.contains('@') {
        return Err("a name and a valid email are required".to_string());
    }

    let service = super::users_service(&args.database_url).await?;

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name.trim().to_string(),
            email: args.email.trim().to_string(),
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    super::print_user(&user);

    Ok(())
}
