//! Input shapes and the validation layer that builds them from raw payloads.

pub mod complaints;
pub mod enums;
pub mod housing;
pub mod infrastructure;
pub mod media;
pub mod publications;
pub mod settings;
pub mod users;
pub mod validate;
pub mod wire;
pub mod work_orders;

pub use complaints::{CreateComplaintInput, UpdateComplaintInput};
pub use enums::{
    ClosedSet, ComplaintStatus, InfrastructureStatus, OccupancyStatus, Priority, PublicationStatus,
    PublicationType, UserRole, WorkOrderStatus,
};
pub use housing::CreateHousingUnitInput;
pub use infrastructure::CreateInfrastructureReportInput;
pub use media::UploadMediaFileInput;
pub use publications::CreatePublicationInput;
pub use settings::UpdateSystemSettingInput;
pub use users::{CreateUserInput, UpdateUserInput};
pub use validate::{FieldViolation, FromPayload, ValidationFailure};
pub use work_orders::CreateWorkOrderInput;

use validate::{len_between, min_len, numeric, Length, Precision};

/// Titles shared by complaints, reports, publications and work orders.
pub(crate) const TITLE: Length = len_between(5, 200);
/// Long-form descriptions and content bodies.
pub(crate) const BODY: Length = min_len(10);
pub(crate) const ADDRESS: Length = min_len(5);
pub(crate) const PERSON_NAME: Length = len_between(2, 100);
/// Estimated and actual costs, stored as NUMERIC(12, 2).
pub(crate) const COST: Precision = numeric(12, 2);
