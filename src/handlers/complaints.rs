use chrono::{DateTime, Utc};
use tracing::info;

use crate::database::models::{Complaint, NewComplaint};
use crate::error::ApiError;
use crate::schema::{ComplaintStatus, CreateComplaintInput, UpdateComplaintInput};
use crate::state::AppState;

/// New complaints start PENDING and unassigned.
pub async fn create_complaint(state: AppState, input: CreateComplaintInput) -> Result<Complaint, ApiError> {
    let complaint = state
        .repos
        .complaints
        .create_complaint(NewComplaint {
            title: input.title,
            description: input.description,
            citizen_name: input.citizen_name,
            citizen_email: input.citizen_email,
            citizen_phone: input.citizen_phone,
            address: input.address,
            status: ComplaintStatus::Pending,
            priority: input.priority,
            assigned_to: None,
            created_at: Utc::now(),
        })
        .await?;

    info!(complaint_id = complaint.id, priority = %complaint.priority, "Complaint created");
    Ok(complaint)
}

pub async fn get_complaints(state: AppState) -> Result<Vec<Complaint>, ApiError> {
    Ok(state.repos.complaints.list_complaints().await?)
}

/// Merges the supplied fields into the stored complaint and keeps
/// `resolved_at` in step with the status.
pub async fn update_complaint(state: AppState, input: UpdateComplaintInput) -> Result<Complaint, ApiError> {
    let id = input.id;
    let now = Utc::now();
    let complaint = state
        .repos
        .complaints
        .update_complaint(
            id,
            Box::new(move |complaint: &mut Complaint| {
                let previous_status = complaint.status;
                input.apply_to(complaint);
                complaint.resolved_at = resolution_time(previous_status, complaint.resolved_at, complaint.status, now);
                complaint.updated_at = now;
            }),
        )
        .await?;

    info!(complaint_id = complaint.id, status = %complaint.status, "Complaint updated");
    Ok(complaint)
}

/// RESOLVED stamps the time on entry; CLOSED keeps an earlier stamp or takes
/// one; any other status clears it.
fn resolution_time(
    previous: ComplaintStatus,
    resolved_at: Option<DateTime<Utc>>,
    next: ComplaintStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match next {
        ComplaintStatus::Resolved if previous != ComplaintStatus::Resolved => Some(now),
        status if status.is_resolution() => resolved_at.or(Some(now)),
        _ => None,
    }
}
