pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{authorize, AuthUser, RequirePermission};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use response::{envelope_method_not_allowed, not_found, ApiResponse, ApiResult};
