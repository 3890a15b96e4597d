use chrono::Utc;
use tracing::info;

use crate::auth::Actor;
use crate::database::models::{NewWorkOrder, WorkOrder};
use crate::error::ApiError;
use crate::schema::CreateWorkOrderInput;
use crate::state::AppState;

/// Work orders always open PENDING with no actual cost or completion date.
pub async fn create_work_order(
    state: AppState,
    input: CreateWorkOrderInput,
    created_by: Actor,
) -> Result<WorkOrder, ApiError> {
    let order = state
        .repos
        .work_orders
        .create_work_order(NewWorkOrder {
            title: input.title,
            description: input.description,
            complaint_id: input.complaint_id,
            assigned_to: input.assigned_to,
            priority: input.priority,
            estimated_cost: input.estimated_cost,
            scheduled_date: input.scheduled_date,
            created_by: created_by.id,
            created_at: Utc::now(),
        })
        .await?;

    info!(work_order_id = order.id, complaint_id = ?order.complaint_id, created_by = order.created_by, "Work order created");
    Ok(order)
}

pub async fn get_work_orders(state: AppState) -> Result<Vec<WorkOrder>, ApiError> {
    Ok(state.repos.work_orders.list_work_orders().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support;
    use crate::schema::{FromPayload, Priority, WorkOrderStatus};
    use serde_json::json;

    #[tokio::test]
    async fn server_controls_status_and_completion_fields() {
        let state = test_support::state();
        let input = CreateWorkOrderInput::from_payload(&json!({
            "title": "Replace lamp post",
            "description": "Replace the lamp post at the Main St junction",
            "complaint_id": null,
            "assigned_to": 2,
            "priority": "URGENT",
            "estimated_cost": 300,
            "scheduled_date": "2024-07-01T09:00:00Z",
            "status": "COMPLETED",
            "actual_cost": 280,
            "completed_date": "2024-07-02",
            "created_by": 99
        }))
        .unwrap();

        let order = create_work_order(state, input, test_support::actor(3)).await.unwrap();
        assert_eq!(order.status, WorkOrderStatus::Pending);
        assert_eq!(order.actual_cost, None);
        assert_eq!(order.completed_date, None);
        assert_eq!(order.created_by, 3);
        assert_eq!(order.priority, Priority::Urgent);
        assert_eq!(order.assigned_to, Some(2));
    }
}
