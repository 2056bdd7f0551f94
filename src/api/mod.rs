//! HTTP API layer
//!
//! Thin actix-web handlers that map HTTP verbs onto [`crate::services::LinkService`].

use actix_web::web;

pub mod services;

pub use services::links::PublicBaseUrl;
pub use services::{AppStartTime, health_routes, links_routes, redirect_routes};

/// 注册全部路由；跳转路由兜底，必须最后注册
///
/// 调用方需提供 `Arc<LinkService>`、[`PublicBaseUrl`] 与 [`AppStartTime`] 三份 app data。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(links_routes()))
        .service(health_routes())
        .service(redirect_routes());
}
