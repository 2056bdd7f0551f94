use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row per code.
///
/// `code`, `target_url` and `created_at` never change after insertion;
/// `click_count` and `last_accessed` are only touched by resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub target_url: String,
    #[serde(default)]
    pub click_count: u64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// 新建记录：点击数为 0，尚未被访问
    pub fn new(code: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
            click_count: 0,
            last_accessed: None,
            created_at: Utc::now(),
        }
    }
}
