//! Links API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::errors::SnaplinkError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建 201 响应
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 SnaplinkError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
///
/// 内部错误只记录日志，对外返回通用提示。
pub fn error_from_snaplink(err: &SnaplinkError) -> HttpResponse {
    let status = err.http_status();
    let error_code = ErrorCode::from(err);

    if err.is_internal() {
        error!("API request failed: {}", err);
        return error_response(status, error_code, "Internal server error");
    }

    error_response(status, error_code, err.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (SnaplinkError::invalid_url("x"), StatusCode::BAD_REQUEST),
            (SnaplinkError::invalid_code_format("x"), StatusCode::BAD_REQUEST),
            (SnaplinkError::code_conflict("x"), StatusCode::CONFLICT),
            (SnaplinkError::not_found("x"), StatusCode::NOT_FOUND),
            (
                SnaplinkError::allocation_exhausted("x"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                SnaplinkError::store_unavailable("disk gone"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(error_from_snaplink(&err).status(), status, "{:?}", err);
        }
    }

    #[test]
    fn test_success_response_status() {
        assert_eq!(success_response("ok").status(), StatusCode::OK);
        assert_eq!(created_response("ok").status(), StatusCode::CREATED);
    }
}
