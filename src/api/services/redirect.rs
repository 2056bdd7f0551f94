use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::errors::SnaplinkError;
use crate::services::LinkService;

pub struct RedirectService {}

impl RedirectService {
    /// 解析短码并跳转，每次成功跳转都计入一次点击
    pub async fn handle_redirect(
        path: web::Path<String>,
        link_service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match link_service.resolve(&code).await {
            Ok(target_url) => {
                trace!("Redirecting {} -> {}", code, target_url);
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header(("Location", target_url))
                    .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .finish()
            }
            Err(SnaplinkError::NotFound(_)) => {
                debug!("Redirect miss: {}", code);
                Self::not_found_response()
            }
            // resolve 已记录内部错误
            Err(_) => Self::error_response(),
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Short link not found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal server error")
    }
}

/// 跳转路由，需最后注册
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}
