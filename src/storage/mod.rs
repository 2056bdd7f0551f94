use std::sync::Arc;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStorage;
pub use models::ShortLink;

/// Durable keyed storage for short links.
///
/// Every mutating operation is atomic for its row. Implementations add no
/// retries: a failing driver call surfaces as `StoreUnavailable`.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Atomic create-if-absent. A taken code yields `CodeConflict`.
    async fn insert(&self, code: &str, target_url: &str) -> Result<ShortLink>;

    /// `NotFound` if the code does not exist.
    async fn get(&self, code: &str) -> Result<ShortLink>;

    /// One page (zero-based) ordered by `created_at` desc, insertion order desc.
    async fn list_page(&self, page: u64, page_size: u64) -> Result<Vec<ShortLink>>;

    async fn count(&self) -> Result<u64>;

    /// `NotFound` if the code does not exist.
    async fn delete(&self, code: &str) -> Result<()>;

    /// Increments `click_count` by one and sets `last_accessed` to now in a
    /// single indivisible step, returning the updated record.
    async fn increment_and_touch(&self, code: &str) -> Result<ShortLink>;

    fn backend_name(&self) -> &str;

    /// 关闭底层连接（关机时调用）
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Lazy, finite, restartable listing over a store, newest first.
///
/// Pages are fetched on demand; `restart` rewinds to the first page. Links
/// inserted or removed while iterating may shift page boundaries.
pub struct LinkPages {
    store: Arc<dyn LinkStore>,
    page_size: u64,
    next_page: u64,
    exhausted: bool,
}

impl LinkPages {
    pub fn new(store: Arc<dyn LinkStore>, page_size: u64) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
            next_page: 0,
            exhausted: false,
        }
    }

    /// 获取下一页，到达末尾时返回 `None`
    pub async fn next_page(&mut self) -> Result<Option<Vec<ShortLink>>> {
        if self.exhausted {
            return Ok(None);
        }

        let links = self.store.list_page(self.next_page, self.page_size).await?;
        self.next_page += 1;

        if (links.len() as u64) < self.page_size {
            self.exhausted = true;
        }

        if links.is_empty() {
            Ok(None)
        } else {
            Ok(Some(links))
        }
    }

    pub fn restart(&mut self) {
        self.next_page = 0;
        self.exhausted = false;
    }

    /// 读取剩余所有页
    pub async fn collect_all(&mut self) -> Result<Vec<ShortLink>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}

pub struct StorageFactory;

impl StorageFactory {
    /// 根据数据库 URL 创建存储后端
    ///
    /// `memory://` 选择进程内存储，其余 URL 交给 SeaORM。
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn LinkStore>> {
        let database_url = &config.database_url;

        if memory::is_memory_url(database_url) {
            return Ok(Arc::new(MemoryStorage::new()));
        }

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
