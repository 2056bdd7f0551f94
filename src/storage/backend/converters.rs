use chrono::{DateTime, Utc};
use sea_orm::{DbErr, SqlErr};

use crate::storage::ShortLink;
use migration::entities::short_link;

/// 将 Sea-ORM Model 转换为 ShortLink
pub fn model_to_shortlink(model: short_link::Model) -> ShortLink {
    ShortLink {
        code: model.short_code,
        target_url: model.target_url,
        click_count: model.click_count.max(0) as u64,
        last_accessed: model.last_accessed,
        created_at: model.created_at,
    }
}

/// 构建新记录的 ActiveModel（id 由数据库自增）
pub fn new_active_model(
    code: &str,
    target_url: &str,
    created_at: DateTime<Utc>,
) -> short_link::ActiveModel {
    use sea_orm::ActiveValue::*;

    short_link::ActiveModel {
        id: NotSet,
        short_code: Set(code.to_string()),
        target_url: Set(target_url.to_string()),
        click_count: Set(0),
        last_accessed: Set(None),
        created_at: Set(created_at),
    }
}

/// 是否为唯一约束冲突（短码已存在）
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
