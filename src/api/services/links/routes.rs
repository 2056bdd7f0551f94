//! Links API 路由配置

use actix_web::http::StatusCode;
use actix_web::{error, web};

use super::error_code::ErrorCode;
use super::helpers::error_response;
use super::link_crud::{delete_link, get_all_links, get_link, post_link};

/// 链接管理路由 `/links`
///
/// 包含：
/// - GET/HEAD /links - 获取所有链接
/// - POST /links - 创建链接
/// - GET/HEAD /links/{code} - 获取单个链接
/// - DELETE /links/{code} - 删除链接
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .app_data(json_config())
        .route("", web::get().to(get_all_links))
        .route("", web::head().to(get_all_links))
        .route("", web::post().to(post_link))
        .route("/{code}", web::get().to(get_link))
        .route("/{code}", web::head().to(get_link))
        .route("/{code}", web::delete().to(delete_link))
}

/// 请求体解析失败时同样返回统一信封
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            let message = format!("Invalid request body: {}", err);
            let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
            error::InternalError::from_response(err, response).into()
        })
}
