use chrono::Utc;
use tracing::info;

use crate::auth::Actor;
use crate::database::models::{InfrastructureReport, NewInfrastructureReport};
use crate::error::ApiError;
use crate::schema::CreateInfrastructureReportInput;
use crate::state::AppState;

pub async fn create_infrastructure_report(
    state: AppState,
    input: CreateInfrastructureReportInput,
    reported_by: Actor,
) -> Result<InfrastructureReport, ApiError> {
    let report = state
        .repos
        .infrastructure_reports
        .create_report(NewInfrastructureReport {
            title: input.title,
            description: input.description,
            location: input.location,
            coordinates: input.coordinates,
            status: input.status,
            maintenance_required: input.maintenance_required,
            estimated_cost: input.estimated_cost,
            reported_by: reported_by.id,
            created_at: Utc::now(),
        })
        .await?;

    info!(report_id = report.id, reported_by = report.reported_by, status = %report.status, "Infrastructure report filed");
    Ok(report)
}

pub async fn get_infrastructure_reports(state: AppState) -> Result<Vec<InfrastructureReport>, ApiError> {
    Ok(state.repos.infrastructure_reports.list_reports().await?)
}
