//! Persistence capabilities the handlers depend on, one trait per entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::manager::{Database, DatabaseError};
use super::memory::MemoryStore;
use super::models::*;
use super::postgres::PgStore;

/// Merge applied to a stored row while the store holds it, so the read and
/// the write-back cannot interleave with another update of the same row.
pub type Change<T> = Box<dyn FnOnce(&mut T) + Send>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    /// Applies `change` to the stored user and writes the result back.
    async fn update_user(&self, id: i32, change: Change<User>) -> Result<User, DatabaseError>;
}

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create_complaint(&self, complaint: NewComplaint) -> Result<Complaint, DatabaseError>;
    async fn list_complaints(&self) -> Result<Vec<Complaint>, DatabaseError>;
    async fn update_complaint(&self, id: i32, change: Change<Complaint>) -> Result<Complaint, DatabaseError>;
}

#[async_trait]
pub trait InfrastructureReportRepository: Send + Sync {
    async fn create_report(&self, report: NewInfrastructureReport) -> Result<InfrastructureReport, DatabaseError>;
    async fn list_reports(&self) -> Result<Vec<InfrastructureReport>, DatabaseError>;
}

#[async_trait]
pub trait HousingUnitRepository: Send + Sync {
    async fn create_unit(&self, unit: NewHousingUnit) -> Result<HousingUnit, DatabaseError>;
    async fn list_units(&self) -> Result<Vec<HousingUnit>, DatabaseError>;
}

#[async_trait]
pub trait PublicationRepository: Send + Sync {
    async fn create_publication(&self, publication: NewPublication) -> Result<Publication, DatabaseError>;
    async fn list_publications(&self) -> Result<Vec<Publication>, DatabaseError>;
}

#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    async fn create_work_order(&self, order: NewWorkOrder) -> Result<WorkOrder, DatabaseError>;
    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>, DatabaseError>;
}

#[async_trait]
pub trait MediaFileRepository: Send + Sync {
    async fn create_media_file(&self, file: NewMediaFile) -> Result<MediaFile, DatabaseError>;
    async fn list_media_files(&self) -> Result<Vec<MediaFile>, DatabaseError>;
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, DatabaseError>;
}

#[async_trait]
pub trait SystemSettingRepository: Send + Sync {
    async fn list_settings(&self) -> Result<Vec<SystemSetting>, DatabaseError>;
    /// Inserts or replaces the row stored under `write.key` in one statement;
    /// the stored description survives when `write.description` is `None`.
    async fn upsert_setting(&self, write: SettingWrite) -> Result<SystemSetting, DatabaseError>;
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Live counters; "recent" means created at or after `recent_since`.
    async fn dashboard_stats(&self, recent_since: DateTime<Utc>) -> Result<DashboardStats, DatabaseError>;
}

#[async_trait]
pub trait StorageHealth: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Every repository the procedures need, as shared trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub complaints: Arc<dyn ComplaintRepository>,
    pub infrastructure_reports: Arc<dyn InfrastructureReportRepository>,
    pub housing_units: Arc<dyn HousingUnitRepository>,
    pub publications: Arc<dyn PublicationRepository>,
    pub work_orders: Arc<dyn WorkOrderRepository>,
    pub media_files: Arc<dyn MediaFileRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
    pub settings: Arc<dyn SystemSettingRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
    pub health: Arc<dyn StorageHealth>,
}

impl Repositories {
    /// Serves every repository from one store.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + ComplaintRepository
            + InfrastructureReportRepository
            + HousingUnitRepository
            + PublicationRepository
            + WorkOrderRepository
            + MediaFileRepository
            + AuditLogRepository
            + SystemSettingRepository
            + DashboardRepository
            + StorageHealth
            + 'static,
    {
        Self {
            users: store.clone(),
            complaints: store.clone(),
            infrastructure_reports: store.clone(),
            housing_units: store.clone(),
            publications: store.clone(),
            work_orders: store.clone(),
            media_files: store.clone(),
            audit_logs: store.clone(),
            settings: store.clone(),
            dashboard: store.clone(),
            health: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }

    pub fn postgres(database: Database) -> Self {
        Self::from_store(Arc::new(PgStore::new(database)))
    }
}
