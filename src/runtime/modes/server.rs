//! Server mode
//!
//! Binds the HTTP server and waits for either server exit or Ctrl+C.

use actix_cors::Cors;
use actix_web::middleware::{Compress, Condition, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::{AppStartTime, PublicBaseUrl, configure_routes};
use crate::config::AppConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
pub async fn run_server(config: &AppConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_startup(config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let link_service = startup.link_service.clone();
    let store_for_shutdown = startup.store.clone();

    let base_url = PublicBaseUrl(config.server.public_base_url());
    let cors_enabled = config.server.cors_enabled;
    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(cors_enabled, Cors::permissive()))
            .wrap(Compress::default())
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(base_url.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
            lifetime::shutdown::close_store(store_for_shutdown).await;
        }
        _ = lifetime::shutdown::listen_for_shutdown(store_for_shutdown.clone()) => {
            info!("Graceful shutdown: storage closed");
        }
    }

    Ok(())
}
