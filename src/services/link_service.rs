//! Link management service
//!
//! The engine facade consumed by the HTTP handlers and the CLI. It holds the
//! store handle it was given; creating and closing the store is the caller's
//! business.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::LinksConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkPages, LinkStore, ShortLink};

use super::allocator::CodeAllocator;
use super::code_source::{CodeSource, ThreadRngSource};
use super::resolver::LinkResolver;

/// Engine knobs, taken from `[links]` in the config.
#[derive(Debug, Clone, Copy)]
pub struct LinkSettings {
    pub max_generation_attempts: u32,
    pub list_page_size: u64,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            max_generation_attempts: 5,
            list_page_size: 100,
        }
    }
}

impl From<&LinksConfig> for LinkSettings {
    fn from(config: &LinksConfig) -> Self {
        Self {
            max_generation_attempts: config.max_generation_attempts,
            list_page_size: config.list_page_size,
        }
    }
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    allocator: CodeAllocator,
    resolver: LinkResolver,
    settings: LinkSettings,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        codes: Arc<dyn CodeSource>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            allocator: CodeAllocator::new(
                store.clone(),
                codes,
                settings.max_generation_attempts,
            ),
            resolver: LinkResolver::new(store.clone()),
            store,
            settings,
        }
    }

    /// Service with the process-level random source and default settings
    pub fn with_defaults(store: Arc<dyn LinkStore>) -> Self {
        Self::new(store, Arc::new(ThreadRngSource), LinkSettings::default())
    }

    pub fn backend_name(&self) -> &str {
        self.store.backend_name()
    }

    // ============ Engine Operations ============

    /// Create a new short link, generated or caller-supplied code
    pub async fn allocate(
        &self,
        target_url: &str,
        requested_code: Option<&str>,
    ) -> Result<ShortLink> {
        self.allocator
            .allocate(target_url, requested_code)
            .await
            .inspect_err(|e| {
                if e.is_internal() {
                    error!("Allocation failed: {}", e);
                }
            })
    }

    /// Look up a code and record the visit, returning the target URL
    pub async fn resolve(&self, code: &str) -> Result<String> {
        self.resolver.resolve(code).await.inspect_err(|e| {
            if e.is_internal() {
                error!("Resolution of {} failed: {}", code, e);
            }
        })
    }

    /// Fetch one link without counting a visit
    pub async fn get(&self, code: &str) -> Result<ShortLink> {
        self.store.get(code).await
    }

    /// Lazy listing, newest first
    pub fn list(&self) -> LinkPages {
        LinkPages::new(self.store.clone(), self.settings.list_page_size)
    }

    /// Every link, newest first
    pub async fn list_all(&self) -> Result<Vec<ShortLink>> {
        self.list().collect_all().await
    }

    pub async fn remove(&self, code: &str) -> Result<()> {
        match self.store.delete(code).await {
            Ok(()) => {
                info!("Removed short link: {}", code);
                Ok(())
            }
            Err(SnaplinkError::NotFound(_)) => Err(SnaplinkError::not_found(format!(
                "Code not found: {}",
                code
            ))),
            Err(e) => Err(e),
        }
    }

    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SequenceSource;
    use crate::storage::MemoryStorage;

    fn service_with_codes(codes: &[&str], attempts: u32) -> LinkService {
        LinkService::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(SequenceSource::new(codes.iter().copied()).unwrap()),
            LinkSettings {
                max_generation_attempts: attempts,
                list_page_size: 2,
            },
        )
    }

    #[tokio::test]
    async fn test_generated_collision_retries() {
        let service = service_with_codes(&["dup001", "dup001", "fresh1"], 5);

        let first = service.allocate("https://a.example", None).await.unwrap();
        assert_eq!(first.code, "dup001");

        // 第二次生成先撞上 dup001，随后拿到 fresh1
        let second = service.allocate("https://b.example", None).await.unwrap();
        assert_eq!(second.code, "fresh1");
    }

    #[tokio::test]
    async fn test_generated_collision_exhausts() {
        let service = service_with_codes(&["same01"], 3);
        service.allocate("https://a.example", None).await.unwrap();

        let err = service
            .allocate("https://b.example", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SnaplinkError::AllocationExhausted(_)));
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_spans_pages() {
        let service = service_with_codes(&["aaaaaa", "bbbbbb", "cccccc"], 1);
        for _ in 0..3 {
            service.allocate("https://x.example", None).await.unwrap();
        }

        let mut pages = service.list();
        let first = pages.next_page().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);
        let second = pages.next_page().await.unwrap().unwrap();
        assert_eq!(second.len(), 1);
        assert!(pages.next_page().await.unwrap().is_none());

        // 可重新开始
        pages.restart();
        let all = pages.collect_all().await.unwrap();
        let codes: Vec<_> = all.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["cccccc", "bbbbbb", "aaaaaa"]);
    }

    #[tokio::test]
    async fn test_remove_missing_reports_code() {
        let service = service_with_codes(&["aaaaaa"], 1);
        let err = service.remove("nothere").await.unwrap_err();
        assert_eq!(err, SnaplinkError::not_found("Code not found: nothere"));
    }
}
