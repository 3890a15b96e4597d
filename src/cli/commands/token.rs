use anyhow::{anyhow, bail};
use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::{AppConfig, MAX_JWT_EXPIRY_HOURS};
use crate::schema::{ClosedSet, UserRole};

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "User id placed in the token subject")]
    pub user_id: i32,
    #[arg(long, help = "Username recorded in the token")]
    pub username: String,
    #[arg(long, help = "Role: ADMIN, MANAGER, STAFF or OFFICER")]
    pub role: String,
    #[arg(
        long,
        value_parser = clap::value_parser!(u64).range(1..=MAX_JWT_EXPIRY_HOURS),
        help = "Lifetime in hours (defaults to JWT_EXPIRY_HOURS)"
    )]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let token = mint(&args, config)?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Token issued",
            Some(json!({ "token": token, "user_id": args.user_id, "role": args.role })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}

fn mint(args: &TokenArgs, config: &AppConfig) -> anyhow::Result<String> {
    let role = UserRole::parse(&args.role).ok_or_else(|| anyhow!("unknown role '{}', expected {}", args.role, UserRole::allowed()))?;
    if config.security.jwt_secret.is_empty() {
        bail!("JWT_SECRET is not set; tokens cannot be issued");
    }

    let hours = args.hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(args.user_id, args.username.clone(), role, hours)?;
    Ok(generate_jwt(&claims, &config.security.jwt_secret)?)
}
