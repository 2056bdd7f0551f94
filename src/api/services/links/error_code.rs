//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::SnaplinkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接错误 3000-3099
    LinkNotFound = 3000,
    LinkAlreadyExists = 3001,
    LinkInvalidUrl = 3002,
    LinkInvalidCode = 3006,
    LinkAllocationExhausted = 3007,
}

impl From<&SnaplinkError> for ErrorCode {
    fn from(err: &SnaplinkError) -> Self {
        match err {
            SnaplinkError::InvalidUrl(_) => ErrorCode::LinkInvalidUrl,
            SnaplinkError::InvalidCodeFormat(_) => ErrorCode::LinkInvalidCode,
            SnaplinkError::CodeConflict(_) => ErrorCode::LinkAlreadyExists,
            SnaplinkError::AllocationExhausted(_) => ErrorCode::LinkAllocationExhausted,
            SnaplinkError::NotFound(_) => ErrorCode::LinkNotFound,
            SnaplinkError::StoreUnavailable(_)
            | SnaplinkError::Config(_)
            | SnaplinkError::FileOperation(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::LinkAlreadyExists).unwrap();
        assert_eq!(json, "3001");

        let code: ErrorCode = serde_json::from_str("1030").unwrap();
        assert_eq!(code, ErrorCode::ServiceUnavailable);
    }

    #[test]
    fn test_engine_errors_map_to_link_codes() {
        assert_eq!(
            ErrorCode::from(&SnaplinkError::code_conflict("x")),
            ErrorCode::LinkAlreadyExists
        );
        assert_eq!(
            ErrorCode::from(&SnaplinkError::not_found("x")),
            ErrorCode::LinkNotFound
        );
        assert_eq!(
            ErrorCode::from(&SnaplinkError::store_unavailable("x")),
            ErrorCode::InternalServerError
        );
    }
}
