use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::services::{LinkService, LinkSettings, ThreadRngSource};
use crate::storage::{LinkStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub link_service: Arc<LinkService>,
}

/// 连接存储并构建 LinkService
///
/// Server 与 CLI 模式共用；store 由调用方负责关闭。
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let link_service = Arc::new(LinkService::new(
        store.clone(),
        Arc::new(ThreadRngSource),
        LinkSettings::from(&config.links),
    ));

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        store,
        link_service,
    })
}
