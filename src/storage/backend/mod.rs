//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{is_unique_violation, model_to_shortlink, new_active_model};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(SnaplinkError::config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://, memory://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(config: &DatabaseConfig, backend_name: &str) -> Result<Self> {
        let database_url = &config.database_url;
        if database_url.is_empty() {
            return Err(SnaplinkError::config("database_url is not set"));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(config, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl LinkStore for SeaOrmStorage {
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        self.insert_link(code, target_url).await
    }

    async fn get(&self, code: &str) -> Result<ShortLink> {
        self.find_link(code)
            .await?
            .ok_or_else(|| SnaplinkError::not_found(format!("Short link not found: {}", code)))
    }

    async fn list_page(&self, page: u64, page_size: u64) -> Result<Vec<ShortLink>> {
        self.load_page(page, page_size).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_links().await
    }

    async fn delete(&self, code: &str) -> Result<()> {
        self.remove_link(code).await
    }

    async fn increment_and_touch(&self, code: &str) -> Result<ShortLink> {
        self.record_click(code).await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn close(&self) -> Result<()> {
        self.db.clone().close().await?;
        Ok(())
    }
}
