//! Append-only records: reports, housing units, publications, work orders
//! and media files.

use async_trait::async_trait;

use super::{write_error, PgStore};
use crate::database::manager::DatabaseError;
use crate::database::models::*;
use crate::database::repository::*;

#[async_trait]
impl InfrastructureReportRepository for PgStore {
    async fn create_report(&self, report: NewInfrastructureReport) -> Result<InfrastructureReport, DatabaseError> {
        sqlx::query_as::<_, InfrastructureReport>(
            "INSERT INTO infrastructure_reports \
             (title, description, location, coordinates, status, maintenance_required, estimated_cost, reported_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) RETURNING *",
        )
        .bind(&report.title)
        .bind(&report.description)
        .bind(&report.location)
        .bind(&report.coordinates)
        .bind(report.status)
        .bind(report.maintenance_required)
        .bind(report.estimated_cost)
        .bind(report.reported_by)
        .bind(report.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(write_error("infrastructure report", "infrastructure_reports"))
    }

    async fn list_reports(&self) -> Result<Vec<InfrastructureReport>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, InfrastructureReport>(
                "SELECT * FROM infrastructure_reports ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(self.pool())
            .await?,
        )
    }
}

#[async_trait]
impl HousingUnitRepository for PgStore {
    async fn create_unit(&self, unit: NewHousingUnit) -> Result<HousingUnit, DatabaseError> {
        sqlx::query_as::<_, HousingUnit>(
            "INSERT INTO housing_units \
             (unit_number, address, unit_type, size_sqm, bedrooms, bathrooms, occupancy_status, monthly_rent, owner_name, owner_contact, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) RETURNING *",
        )
        .bind(&unit.unit_number)
        .bind(&unit.address)
        .bind(&unit.unit_type)
        .bind(unit.size_sqm)
        .bind(unit.bedrooms)
        .bind(unit.bathrooms)
        .bind(unit.occupancy_status)
        .bind(unit.monthly_rent)
        .bind(&unit.owner_name)
        .bind(&unit.owner_contact)
        .bind(unit.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(write_error("housing unit", "housing_units"))
    }

    async fn list_units(&self) -> Result<Vec<HousingUnit>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, HousingUnit>("SELECT * FROM housing_units ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await?,
        )
    }
}

#[async_trait]
impl PublicationRepository for PgStore {
    async fn create_publication(&self, publication: NewPublication) -> Result<Publication, DatabaseError> {
        sqlx::query_as::<_, Publication>(
            "INSERT INTO publications \
             (title, content, \"type\", status, featured, author_id, published_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) RETURNING *",
        )
        .bind(&publication.title)
        .bind(&publication.content)
        .bind(publication.kind)
        .bind(publication.status)
        .bind(publication.featured)
        .bind(publication.author_id)
        .bind(publication.published_at)
        .bind(publication.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(write_error("publication", "publications"))
    }

    async fn list_publications(&self) -> Result<Vec<Publication>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, Publication>("SELECT * FROM publications ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await?,
        )
    }
}

#[async_trait]
impl WorkOrderRepository for PgStore {
    async fn create_work_order(&self, order: NewWorkOrder) -> Result<WorkOrder, DatabaseError> {
        sqlx::query_as::<_, WorkOrder>(
            "INSERT INTO work_orders \
             (title, description, complaint_id, assigned_to, status, priority, estimated_cost, actual_cost, \
              scheduled_date, completed_date, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, 'PENDING', $5, $6, NULL, $7, NULL, $8, $9, $9) RETURNING *",
        )
        .bind(&order.title)
        .bind(&order.description)
        .bind(order.complaint_id)
        .bind(order.assigned_to)
        .bind(order.priority)
        .bind(order.estimated_cost)
        .bind(order.scheduled_date)
        .bind(order.created_by)
        .bind(order.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(write_error("work order", "work_orders"))
    }

    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, WorkOrder>("SELECT * FROM work_orders ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await?,
        )
    }
}

#[async_trait]
impl MediaFileRepository for PgStore {
    async fn create_media_file(&self, file: NewMediaFile) -> Result<MediaFile, DatabaseError> {
        sqlx::query_as::<_, MediaFile>(
            "INSERT INTO media_files \
             (filename, original_name, mime_type, file_size, file_path, uploaded_by, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&file.filename)
        .bind(&file.original_name)
        .bind(&file.mime_type)
        .bind(file.file_size)
        .bind(&file.file_path)
        .bind(file.uploaded_by)
        .bind(file.created_at)
        .fetch_one(self.pool())
        .await
        .map_err(write_error("media file", "media_files"))
    }

    async fn list_media_files(&self) -> Result<Vec<MediaFile>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, MediaFile>("SELECT * FROM media_files ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await?,
        )
    }
}
