//! Links API CRUD 操作

use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::LinkService;

use super::helpers::{created_response, error_from_snaplink, success_response};
use super::types::{CreatedLinkResponse, LinkResponse, PostNewLink, PublicBaseUrl};

/// 创建短链接（可指定短码）
pub async fn post_link(
    link_service: web::Data<Arc<LinkService>>,
    base_url: web::Data<PublicBaseUrl>,
    body: web::Json<PostNewLink>,
) -> impl Responder {
    let body = body.into_inner();
    trace!("Links API: create request for {}", body.url);

    match link_service.allocate(&body.url, body.code.as_deref()).await {
        Ok(link) => {
            let short_url = base_url.short_url(&link.code);
            created_response(CreatedLinkResponse {
                link: LinkResponse::from(link),
                short_url,
            })
        }
        Err(e) => error_from_snaplink(&e),
    }
}

/// 获取所有链接（按创建时间倒序）
pub async fn get_all_links(link_service: web::Data<Arc<LinkService>>) -> HttpResponse {
    match link_service.list_all().await {
        Ok(links) => {
            info!("Links API: returning {} links", links.len());
            let links: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();
            success_response(links)
        }
        Err(e) => error_from_snaplink(&e),
    }
}

/// 获取单个链接，不计入点击
pub async fn get_link(
    link_service: web::Data<Arc<LinkService>>,
    code: web::Path<String>,
) -> HttpResponse {
    match link_service.get(&code).await {
        Ok(link) => success_response(LinkResponse::from(link)),
        Err(e) => error_from_snaplink(&e),
    }
}

pub async fn delete_link(
    link_service: web::Data<Arc<LinkService>>,
    code: web::Path<String>,
) -> HttpResponse {
    let code = code.into_inner();
    match link_service.remove(&code).await {
        Ok(()) => success_response(serde_json::json!({ "code": code })),
        Err(e) => error_from_snaplink(&e),
    }
}
