use async_trait::async_trait;

use super::{write_error, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::{Complaint, NewComplaint};
use crate::database::repository::{Change, ComplaintRepository};

#[async_trait]
impl ComplaintRepository for PgStore {
    async fn create_complaint(&self, complaint: NewComplaint) -> Result<Complaint, DatabaseError> {
        sqlx::query_as::<_, Complaint>(
            "INSERT INTO complaints \
             (title, description, citizen_name, citizen_email, citizen_phone, address, status, priority, assigned_to, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING *",
        )
        .bind(&complaint.title)
        .bind(&complaint.description)
        .bind(&complaint.citizen_name)
        .bind(&complaint.citizen_email)
        .bind(&complaint.citizen_phone)
        .bind(&complaint.address)
        .bind(complaint.status)
        .bind(complaint.priority)
        .bind(complaint.assigned_to)
        .bind(complaint.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(write_error("complaint", "complaints"))
    }

    async fn list_complaints(&self) -> Result<Vec<Complaint>, DatabaseError> {
        Ok(sqlx::query_as::<_, Complaint>("SELECT * FROM complaints ORDER BY created_at DESC, id DESC")
            .fetch_all(self.pool())
            .await?)
    }

    async fn update_complaint(&self, id: i32, change: Change<Complaint>) -> Result<Complaint, DatabaseError> {
        let mut tx = self.pool().begin().await?;

        let mut complaint = sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DatabaseError::not_found("complaint", id))?;
        change(&mut complaint);

        let updated = sqlx::query_as::<_, Complaint>(
            "UPDATE complaints SET title = $2, description = $3, status = $4, priority = $5, assigned_to = $6, \
             updated_at = $7, resolved_at = $8 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&complaint.title)
        .bind(&complaint.description)
        .bind(complaint.status)
        .bind(complaint.priority)
        .bind(complaint.assigned_to)
        .bind(complaint.updated_at)
        .bind(complaint.resolved_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error("complaint", "complaints"))?;

        tx.commit().await?;
        Ok(updated)
    }
}
