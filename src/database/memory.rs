//! In-process store used when no database URL is configured and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::*;
use super::repository::*;
use crate::schema::{ComplaintStatus, OccupancyStatus, WorkOrderStatus};

/// Rows of one entity plus its id sequence.
struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.push(row.clone());
        row
    }
}

struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    users: Vec<StoredUser>,
    last_user_id: i32,
    complaints: Table<Complaint>,
    reports: Table<InfrastructureReport>,
    units: Table<HousingUnit>,
    publications: Table<Publication>,
    work_orders: Table<WorkOrder>,
    media_files: Table<MediaFile>,
    audit_logs: Table<AuditLog>,
    settings: Table<SystemSetting>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds audit entries; nothing in this service writes them.
    pub fn with_audit_logs(mut self, logs: Vec<AuditLog>) -> Self {
        let tables = self.tables.get_mut();
        for log in logs {
            tables.audit_logs.last_id = tables.audit_logs.last_id.max(log.id);
            tables.audit_logs.rows.push(log);
        }
        self
    }

    pub async fn password_hash(&self, user_id: i32) -> Option<String> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|s| s.user.id == user_id)
            .map(|s| s.password_hash.clone())
    }
}

fn newest_first<T: Clone>(rows: &[T], key: impl Fn(&T) -> (DateTime<Utc>, i32)) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| key(b).cmp(&key(a)));
    sorted
}

fn count<T>(rows: &[T], predicate: impl Fn(&T) -> bool) -> i64 {
    rows.iter().filter(|row| predicate(row)).count() as i64
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|s| s.user.username == new.username) {
            return Err(DatabaseError::conflict("user", "username"));
        }
        if tables.users.iter().any(|s| s.user.email == new.email) {
            return Err(DatabaseError::conflict("user", "email"));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: new.username,
            email: new.email,
            full_name: new.full_name,
            role: new.role,
            is_active: new.is_active,
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        tables.users.push(StoredUser {
            user: user.clone(),
            password_hash: new.password_hash,
        });
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables.read().await;
        let users: Vec<User> = tables.users.iter().map(|s| s.user.clone()).collect();
        Ok(newest_first(&users, |u| (u.created_at, u.id)))
    }

    async fn update_user(&self, id: i32, change: Change<User>) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        let mut user = tables
            .users
            .iter()
            .find(|s| s.user.id == id)
            .map(|s| s.user.clone())
            .ok_or(DatabaseError::not_found("user", id))?;
        change(&mut user);

        let others = &tables.users;
        if others.iter().any(|s| s.user.id != id && s.user.username == user.username) {
            return Err(DatabaseError::conflict("user", "username"));
        }
        if others.iter().any(|s| s.user.id != id && s.user.email == user.email) {
            return Err(DatabaseError::conflict("user", "email"));
        }

        let stored = tables
            .users
            .iter_mut()
            .find(|s| s.user.id == id)
            .ok_or(DatabaseError::not_found("user", id))?;
        stored.user = User {
            id,
            created_at: stored.user.created_at,
            ..user
        };
        Ok(stored.user.clone())
    }
}

#[async_trait]
impl ComplaintRepository for MemoryStore {
    async fn create_complaint(&self, new: NewComplaint) -> Result<Complaint, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.complaints.insert(|id| Complaint {
            id,
            title: new.title,
            description: new.description,
            citizen_name: new.citizen_name,
            citizen_email: new.citizen_email,
            citizen_phone: new.citizen_phone,
            address: new.address,
            status: new.status,
            priority: new.priority,
            assigned_to: new.assigned_to,
            created_at: new.created_at,
            updated_at: new.created_at,
            resolved_at: None,
        }))
    }

    async fn list_complaints(&self) -> Result<Vec<Complaint>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.complaints.rows, |c| (c.created_at, c.id)))
    }

    async fn update_complaint(&self, id: i32, change: Change<Complaint>) -> Result<Complaint, DatabaseError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .complaints
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DatabaseError::not_found("complaint", id))?;

        let mut complaint = stored.clone();
        change(&mut complaint);
        *stored = Complaint {
            id,
            created_at: stored.created_at,
            ..complaint
        };
        Ok(stored.clone())
    }
}

#[async_trait]
impl InfrastructureReportRepository for MemoryStore {
    async fn create_report(&self, new: NewInfrastructureReport) -> Result<InfrastructureReport, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.reports.insert(|id| InfrastructureReport {
            id,
            title: new.title,
            description: new.description,
            location: new.location,
            coordinates: new.coordinates,
            status: new.status,
            maintenance_required: new.maintenance_required,
            estimated_cost: new.estimated_cost,
            reported_by: new.reported_by,
            created_at: new.created_at,
            updated_at: new.created_at,
        }))
    }

    async fn list_reports(&self) -> Result<Vec<InfrastructureReport>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.reports.rows, |r| (r.created_at, r.id)))
    }
}

#[async_trait]
impl HousingUnitRepository for MemoryStore {
    async fn create_unit(&self, new: NewHousingUnit) -> Result<HousingUnit, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.units.rows.iter().any(|u| u.unit_number == new.unit_number) {
            return Err(DatabaseError::conflict("housing unit", "unit_number"));
        }
        Ok(tables.units.insert(|id| HousingUnit {
            id,
            unit_number: new.unit_number,
            address: new.address,
            unit_type: new.unit_type,
            size_sqm: new.size_sqm,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            occupancy_status: new.occupancy_status,
            monthly_rent: new.monthly_rent,
            owner_name: new.owner_name,
            owner_contact: new.owner_contact,
            created_at: new.created_at,
            updated_at: new.created_at,
        }))
    }

    async fn list_units(&self) -> Result<Vec<HousingUnit>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.units.rows, |u| (u.created_at, u.id)))
    }
}

#[async_trait]
impl PublicationRepository for MemoryStore {
    async fn create_publication(&self, new: NewPublication) -> Result<Publication, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.publications.insert(|id| Publication {
            id,
            title: new.title,
            content: new.content,
            kind: new.kind,
            status: new.status,
            featured: new.featured,
            author_id: new.author_id,
            published_at: new.published_at,
            created_at: new.created_at,
            updated_at: new.created_at,
        }))
    }

    async fn list_publications(&self) -> Result<Vec<Publication>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.publications.rows, |p| (p.created_at, p.id)))
    }
}

#[async_trait]
impl WorkOrderRepository for MemoryStore {
    async fn create_work_order(&self, new: NewWorkOrder) -> Result<WorkOrder, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.work_orders.insert(|id| WorkOrder {
            id,
            title: new.title,
            description: new.description,
            complaint_id: new.complaint_id,
            assigned_to: new.assigned_to,
            status: WorkOrderStatus::Pending,
            priority: new.priority,
            estimated_cost: new.estimated_cost,
            actual_cost: None,
            scheduled_date: new.scheduled_date,
            completed_date: None,
            created_by: new.created_by,
            created_at: new.created_at,
            updated_at: new.created_at,
        }))
    }

    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.work_orders.rows, |w| (w.created_at, w.id)))
    }
}

#[async_trait]
impl MediaFileRepository for MemoryStore {
    async fn create_media_file(&self, new: NewMediaFile) -> Result<MediaFile, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.media_files.insert(|id| MediaFile {
            id,
            filename: new.filename,
            original_name: new.original_name,
            mime_type: new.mime_type,
            file_size: new.file_size,
            file_path: new.file_path,
            uploaded_by: new.uploaded_by,
            created_at: new.created_at,
        }))
    }

    async fn list_media_files(&self) -> Result<Vec<MediaFile>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.media_files.rows, |m| (m.created_at, m.id)))
    }
}

#[async_trait]
impl AuditLogRepository for MemoryStore {
    async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.audit_logs.rows, |l| (l.created_at, l.id)))
    }
}

#[async_trait]
impl SystemSettingRepository for MemoryStore {
    async fn list_settings(&self) -> Result<Vec<SystemSetting>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut settings = tables.settings.rows.clone();
        settings.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(settings)
    }

    async fn upsert_setting(&self, write: SettingWrite) -> Result<SystemSetting, DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables.settings.rows.iter_mut().find(|s| s.key == write.key) {
            stored.value = write.value;
            if let Some(description) = write.description {
                stored.description = description;
            }
            stored.updated_by = write.updated_by;
            stored.updated_at = write.updated_at;
            return Ok(stored.clone());
        }

        Ok(tables.settings.insert(|id| SystemSetting {
            id,
            key: write.key,
            value: write.value,
            description: write.description.flatten(),
            updated_by: write.updated_by,
            updated_at: write.updated_at,
        }))
    }
}

#[async_trait]
impl DashboardRepository for MemoryStore {
    async fn dashboard_stats(&self, recent_since: DateTime<Utc>) -> Result<DashboardStats, DatabaseError> {
        let tables = self.tables.read().await;
        let complaints = &tables.complaints.rows;
        let work_orders = &tables.work_orders.rows;
        let units = &tables.units.rows;
        let users = &tables.users;

        Ok(DashboardStats {
            total_complaints: complaints.len() as i64,
            pending_complaints: count(complaints, |c| c.status == ComplaintStatus::Pending),
            resolved_complaints: count(complaints, |c| c.status.is_resolution()),
            total_work_orders: work_orders.len() as i64,
            active_work_orders: count(work_orders, |w| w.status.is_active()),
            completed_work_orders: count(work_orders, |w| w.status == WorkOrderStatus::Completed),
            total_housing_units: units.len() as i64,
            occupied_units: count(units, |u| u.occupancy_status == OccupancyStatus::Occupied),
            vacant_units: count(units, |u| u.occupancy_status == OccupancyStatus::Vacant),
            total_users: users.len() as i64,
            active_users: count(users, |s| s.user.is_active),
            recent_complaints: count(complaints, |c| c.created_at >= recent_since),
            recent_reports: count(&tables.reports.rows, |r: &InfrastructureReport| r.created_at >= recent_since),
        })
    }
}

#[async_trait]
impl StorageHealth for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
