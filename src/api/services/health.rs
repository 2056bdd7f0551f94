use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::services::LinkService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub backend: String,
    pub status: String,
    pub links_count: Option<u64>,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub uptime: u64,
    pub storage: HealthStorageCheck,
}

/// Health Service
///
/// 只查 count，不加载全表；存储超时或出错时返回 503。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        link_service: web::Data<Arc<LinkService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend = link_service.backend_name().to_string();

        let storage =
            match tokio::time::timeout(Duration::from_secs(5), link_service.count()).await {
                Ok(Ok(count)) => {
                    trace!("Storage health check passed, {} links found", count);
                    HealthStorageCheck {
                        backend,
                        status: "healthy".to_string(),
                        links_count: Some(count),
                        error: None,
                    }
                }
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    HealthStorageCheck {
                        backend,
                        status: "unhealthy".to_string(),
                        links_count: None,
                        error: Some("storage error".to_string()),
                    }
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    HealthStorageCheck {
                        backend,
                        status: "unhealthy".to_string(),
                        links_count: None,
                        error: Some("timeout".to_string()),
                    }
                }
            };

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let ok = storage.status == "healthy";

        trace!(
            "Health check completed in {:?}, ok: {}",
            start_time.elapsed(),
            ok
        );

        let status = if ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(status)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(HealthResponse {
                ok,
                version: env!("CARGO_PKG_VERSION").to_string(),
                uptime,
                storage,
            })
    }
}

/// 健康检查路由 `/healthz`
pub fn health_routes() -> actix_web::Scope {
    web::scope("/healthz")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
