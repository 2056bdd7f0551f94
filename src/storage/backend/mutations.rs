//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. Each one is atomic
//! for its row; none is retried.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, ExprTrait, QueryFilter, TransactionTrait};
use tracing::{error, info, trace};

use super::SeaOrmStorage;
use super::converters::{is_unique_violation, model_to_shortlink, new_active_model};
use crate::errors::{Result, SnaplinkError};
use crate::storage::ShortLink;

use migration::entities::short_link;

impl SeaOrmStorage {
    /// 单条 INSERT，依赖 short_code 唯一约束拒绝重复
    pub(super) async fn insert_link(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        let link = ShortLink::new(code, target_url);
        let active_model = new_active_model(&link.code, &link.target_url, link.created_at);

        match short_link::Entity::insert(active_model).exec(&self.db).await {
            Ok(_) => {
                info!("Short link created: {}", code);
                Ok(link)
            }
            Err(e) if is_unique_violation(&e) => {
                trace!("Insert rejected, code already taken: {}", code);
                Err(SnaplinkError::code_conflict(format!(
                    "Short code already exists: {}",
                    code
                )))
            }
            Err(e) => {
                error!("Failed to insert short link {}: {}", code, e);
                Err(SnaplinkError::store_unavailable(format!(
                    "Failed to insert short link: {}",
                    e
                )))
            }
        }
    }

    pub(super) async fn remove_link(&self, code: &str) -> Result<()> {
        let result = short_link::Entity::delete_many()
            .filter(short_link::Column::ShortCode.eq(code))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SnaplinkError::store_unavailable(format!("Failed to delete short link: {}", e))
            })?;

        if result.rows_affected == 0 {
            return Err(SnaplinkError::not_found(format!(
                "Short link not found: {}",
                code
            )));
        }

        info!("Short link deleted: {}", code);
        Ok(())
    }

    /// 原子地 click_count + 1 并更新 last_accessed
    ///
    /// UPDATE 与回读在同一事务内：UPDATE 持有的行锁保证回读看到的正是本次更新。
    pub(super) async fn record_click(&self, code: &str) -> Result<ShortLink> {
        let txn = self.db.begin().await.map_err(|e| {
            SnaplinkError::store_unavailable(format!("Failed to begin transaction: {}", e))
        })?;

        let updated = short_link::Entity::update_many()
            .col_expr(
                short_link::Column::ClickCount,
                Expr::col(short_link::Column::ClickCount).add(1),
            )
            .col_expr(short_link::Column::LastAccessed, Expr::value(Utc::now()))
            .filter(short_link::Column::ShortCode.eq(code))
            .exec(&txn)
            .await
            .map_err(|e| {
                SnaplinkError::store_unavailable(format!("Failed to record click: {}", e))
            })?;

        if updated.rows_affected == 0 {
            // 未修改任何行，事务直接丢弃即可
            txn.rollback().await.map_err(|e| {
                SnaplinkError::store_unavailable(format!("Failed to roll back: {}", e))
            })?;
            return Err(SnaplinkError::not_found(format!(
                "Short link not found: {}",
                code
            )));
        }

        let model = short_link::Entity::find()
            .filter(short_link::Column::ShortCode.eq(code))
            .one(&txn)
            .await
            .map_err(|e| {
                SnaplinkError::store_unavailable(format!("Failed to read back click: {}", e))
            })?
            .ok_or_else(|| {
                SnaplinkError::store_unavailable(format!("Updated row vanished: {}", code))
            })?;

        txn.commit().await.map_err(|e| {
            SnaplinkError::store_unavailable(format!("Failed to commit click: {}", e))
        })?;

        trace!("Click recorded for {} (total {})", code, model.click_count);
        Ok(model_to_shortlink(model))
    }
}
