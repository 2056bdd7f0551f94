//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::{error, trace};

use super::SeaOrmStorage;
use super::converters::model_to_shortlink;
use crate::errors::{Result, SnaplinkError};
use crate::storage::ShortLink;

use migration::entities::short_link;

impl SeaOrmStorage {
    pub(super) async fn find_link(&self, code: &str) -> Result<Option<ShortLink>> {
        let model = short_link::Entity::find()
            .filter(short_link::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to query short link {}: {}", code, e);
                SnaplinkError::store_unavailable(format!("Failed to query short link: {}", e))
            })?;

        Ok(model.map(model_to_shortlink))
    }

    /// 分页加载，按创建时间倒序，同一时间按插入顺序倒序
    pub(super) async fn load_page(&self, page: u64, page_size: u64) -> Result<Vec<ShortLink>> {
        let models = short_link::Entity::find()
            .order_by_desc(short_link::Column::CreatedAt)
            .order_by_desc(short_link::Column::Id)
            .paginate(&self.db, page_size.max(1))
            .fetch_page(page)
            .await
            .map_err(|e| {
                error!("Paginated query failed: {}", e);
                SnaplinkError::store_unavailable(format!("Failed to list short links: {}", e))
            })?;

        trace!("Loaded page {} with {} links", page, models.len());
        Ok(models.into_iter().map(model_to_shortlink).collect())
    }

    pub(super) async fn count_links(&self) -> Result<u64> {
        short_link::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| SnaplinkError::store_unavailable(format!("Failed to count links: {}", e)))
    }
}
