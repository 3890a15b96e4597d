use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let redacted = config.redacted();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&redacted)?),
        OutputFormat::Text => {
            println!("Environment:    {:?}", redacted.environment);
            println!("Listen:         {}", redacted.bind_addr());
            println!("Max body:       {} bytes", redacted.api.max_request_size_bytes);
            println!(
                "Database:       {}",
                redacted.database.url.as_deref().unwrap_or("(in-memory store)")
            );
            println!("Pool size:      {}", redacted.database.max_connections);
            println!("Migrations:     {}", if redacted.database.run_migrations { "on start" } else { "manual" });
            println!(
                "JWT secret:     {}",
                if redacted.security.jwt_secret.is_empty() { "(unset)" } else { redacted.security.jwt_secret.as_str() }
            );
            println!("Token lifetime: {}h", redacted.security.jwt_expiry_hours);
            println!("Recent window:  {} days", redacted.dashboard.recent_window_days);
        }
    }
    Ok(())
}
