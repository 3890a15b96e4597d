use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::database::Database;

pub async fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = Database::connect(&config.database).await?;
    database.migrate().await?;
    database.close().await;

    output_success(&output_format, "Migrations applied", None)
}
