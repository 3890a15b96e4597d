use super::ProcedureTable;
use crate::handlers::{admin, complaints, dashboard, health, housing, infrastructure, media, publications, users, work_orders};

/// Every procedure the admin API exposes.
pub fn procedures() -> ProcedureTable {
    ProcedureTable::builder()
        .query("healthcheck", health::healthcheck)
        .query("getDashboardStats", dashboard::get_dashboard_stats)
        // Users
        .query("getUsers", users::get_users)
        .mutation("createUser", users::create_user)
        .mutation("updateUser", users::update_user)
        // Complaints
        .query("getComplaints", complaints::get_complaints)
        .mutation("createComplaint", complaints::create_complaint)
        .mutation("updateComplaint", complaints::update_complaint)
        // Infrastructure
        .query("getInfrastructureReports", infrastructure::get_infrastructure_reports)
        .actor_mutation(
            "createInfrastructureReport",
            "reported_by",
            infrastructure::create_infrastructure_report,
        )
        // Housing
        .query("getHousingUnits", housing::get_housing_units)
        .mutation("createHousingUnit", housing::create_housing_unit)
        // Publications
        .query("getPublications", publications::get_publications)
        .actor_mutation("createPublication", "author_id", publications::create_publication)
        // Work orders
        .query("getWorkOrders", work_orders::get_work_orders)
        .actor_mutation("createWorkOrder", "created_by", work_orders::create_work_order)
        // Media
        .query("getMediaFiles", media::get_media_files)
        .actor_mutation("uploadMediaFile", "uploaded_by", media::upload_media_file)
        // Administration
        .query("getAuditLogs", admin::get_audit_logs)
        .query("getSystemSettings", admin::get_system_settings)
        .actor_mutation("updateSystemSetting", "updated_by", admin::update_system_setting)
        .build()
}
