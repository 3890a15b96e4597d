pub mod actor;
pub mod response;

pub use actor::resolve_actor;
pub use response::{ApiResponse, ApiResult};
