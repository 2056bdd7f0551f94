//! In-process storage backend
//!
//! Not durable. Selected with `memory://`; mostly useful for tests and
//! throwaway instances.
//!
//! Listing is not indexed: each `list_page` call scans every entry, so a
//! full walk with `LinkPages` costs O(N) per page.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{info, trace};

use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStore, ShortLink};

/// 判断是否为内存存储 URL
pub fn is_memory_url(database_url: &str) -> bool {
    database_url == "memory" || database_url.starts_with("memory://")
}

struct StoredLink {
    link: ShortLink,
    /// 插入序号，用于同一 created_at 的排序
    seq: u64,
}

/// DashMap 分片锁提供单键原子性
#[derive(Default)]
pub struct MemoryStorage {
    links: DashMap<String, StoredLink>,
    next_seq: AtomicU64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新的在前，同一 created_at 按插入序号倒序
    fn newest_first(a: &(u64, ShortLink), b: &(u64, ShortLink)) -> std::cmp::Ordering {
        b.1.created_at
            .cmp(&a.1.created_at)
            .then_with(|| b.0.cmp(&a.0))
    }

    /// 只排序前 `limit` 条，其余部分保持无序
    fn newest(&self, limit: usize) -> Vec<ShortLink> {
        let mut entries: Vec<(u64, ShortLink)> = self
            .links
            .iter()
            .map(|e| (e.seq, e.link.clone()))
            .collect();

        if limit == 0 {
            return Vec::new();
        }
        if limit < entries.len() {
            entries.select_nth_unstable_by(limit - 1, Self::newest_first);
            entries.truncate(limit);
        }
        entries.sort_unstable_by(Self::newest_first);

        entries.into_iter().map(|(_, link)| link).collect()
    }

    fn insert_link(&self, link: ShortLink) -> Result<ShortLink> {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(SnaplinkError::code_conflict(format!(
                "Short code already exists: {}",
                link.code
            ))),
            Entry::Vacant(vacant) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                info!("Short link created: {}", link.code);
                vacant.insert(StoredLink {
                    link: link.clone(),
                    seq,
                });
                Ok(link)
            }
        }
    }
}

#[async_trait]
impl LinkStore for MemoryStorage {
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink> {
        self.insert_link(ShortLink::new(code, target_url))
    }

    async fn get(&self, code: &str) -> Result<ShortLink> {
        self.links
            .get(code)
            .map(|e| e.link.clone())
            .ok_or_else(|| SnaplinkError::not_found(format!("Short link not found: {}", code)))
    }

    async fn list_page(&self, page: u64, page_size: u64) -> Result<Vec<ShortLink>> {
        let page_size = page_size.max(1) as usize;
        let start = (page as usize).saturating_mul(page_size);
        if start >= self.links.len() {
            return Ok(Vec::new());
        }

        Ok(self
            .newest(start.saturating_add(page_size))
            .into_iter()
            .skip(start)
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.links.len() as u64)
    }

    async fn delete(&self, code: &str) -> Result<()> {
        match self.links.remove(code) {
            Some(_) => {
                info!("Short link deleted: {}", code);
                Ok(())
            }
            None => Err(SnaplinkError::not_found(format!(
                "Short link not found: {}",
                code
            ))),
        }
    }

    async fn increment_and_touch(&self, code: &str) -> Result<ShortLink> {
        // get_mut 持有分片写锁，计数与时间戳一起更新
        let mut entry = self
            .links
            .get_mut(code)
            .ok_or_else(|| SnaplinkError::not_found(format!("Short link not found: {}", code)))?;

        entry.link.click_count += 1;
        entry.link.last_accessed = Some(Utc::now());
        trace!(
            "Click recorded for {} (total {})",
            code, entry.link.click_count
        );
        Ok(entry.link.clone())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
