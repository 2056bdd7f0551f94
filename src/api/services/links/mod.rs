//! 短链接管理 API（`/api/links`）

pub mod error_code;
pub mod helpers;
pub mod link_crud;
pub mod routes;
pub mod types;

pub use error_code::ErrorCode;
pub use routes::links_routes;
pub use types::{ApiResponse, CreatedLinkResponse, LinkResponse, PostNewLink, PublicBaseUrl};
