//! Links API 类型定义

use serde::{Deserialize, Serialize};

use crate::storage::ShortLink;

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostNewLink {
    pub url: String,
    pub code: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LinkResponse {
    pub code: String,
    pub target_url: String,
    pub click_count: u64,
    pub last_accessed: Option<String>,
    pub created_at: String,
}

impl From<ShortLink> for LinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            code: link.code,
            target_url: link.target_url,
            click_count: link.click_count,
            last_accessed: link.last_accessed.map(|dt| dt.to_rfc3339()),
            created_at: link.created_at.to_rfc3339(),
        }
    }
}

/// 创建成功后返回的链接，附带完整短链
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreatedLinkResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub short_url: String,
}

/// 拼接短链时使用的公开地址
#[derive(Clone, Debug)]
pub struct PublicBaseUrl(pub String);

impl PublicBaseUrl {
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.0.trim_end_matches('/'), code)
    }
}
