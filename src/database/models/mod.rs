pub mod audit_log;
pub mod complaint;
pub mod dashboard;
pub mod housing_unit;
pub mod infrastructure_report;
pub mod media_file;
pub mod publication;
pub mod system_setting;
pub mod user;
pub mod work_order;

pub use audit_log::AuditLog;
pub use complaint::{Complaint, NewComplaint};
pub use dashboard::DashboardStats;
pub use housing_unit::{HousingUnit, NewHousingUnit};
pub use infrastructure_report::{InfrastructureReport, NewInfrastructureReport};
pub use media_file::{MediaFile, NewMediaFile};
pub use publication::{NewPublication, Publication};
pub use system_setting::{SettingWrite, SystemSetting};
pub use user::{NewUser, User};
pub use work_order::{NewWorkOrder, WorkOrder};
