//! Storage backend tests
//!
//! SeaOrmStorage against temporary SQLite databases.

use std::sync::Arc;

use snaplink::config::DatabaseConfig;
use snaplink::errors::SnaplinkError;
use snaplink::storage::backend::{SeaOrmStorage, infer_backend_from_url, new_active_model};
use snaplink::storage::{LinkStore, StorageFactory};
use tempfile::TempDir;

use migration::entities::short_link;
use sea_orm::EntityTrait;

fn sqlite_config(dir: &TempDir, name: &str) -> DatabaseConfig {
    let db_path = dir.path().join(name);
    DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    }
}

/// 创建临时 SQLite 数据库的存储实例
async fn create_temp_storage() -> (SeaOrmStorage, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = sqlite_config(&temp_dir, "test.db");

    let storage = SeaOrmStorage::new(&config, "sqlite")
        .await
        .expect("Failed to create storage");

    (storage, temp_dir)
}

// =============================================================================
// Backend inference
// =============================================================================

#[test]
fn test_infer_backend_from_url() {
    assert_eq!(infer_backend_from_url("sqlite://links.db").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("data/links.db").unwrap(), "sqlite");
    assert_eq!(infer_backend_from_url("links.sqlite").unwrap(), "sqlite");
    assert_eq!(
        infer_backend_from_url("mysql://root@localhost/db").unwrap(),
        "mysql"
    );
    assert_eq!(
        infer_backend_from_url("mariadb://root@localhost/db").unwrap(),
        "mysql"
    );
    assert_eq!(
        infer_backend_from_url("postgresql://localhost/db").unwrap(),
        "postgres"
    );
    assert!(matches!(
        infer_backend_from_url("redis://localhost"),
        Err(SnaplinkError::Config(_))
    ));
}

#[tokio::test]
async fn test_factory_selects_backend() {
    let memory = StorageFactory::create(&DatabaseConfig {
        database_url: "memory://".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(memory.backend_name(), "memory");

    let dir = TempDir::new().unwrap();
    let sqlite = StorageFactory::create(&sqlite_config(&dir, "factory.db"))
        .await
        .unwrap();
    assert_eq!(sqlite.backend_name(), "sqlite");
    sqlite.close().await.unwrap();
}

// =============================================================================
// Insert / get
// =============================================================================

#[tokio::test]
async fn test_insert_then_get() {
    let (storage, _dir) = create_temp_storage().await;

    let created = storage.insert("abc123", "https://example.com").await.unwrap();
    assert_eq!(created.code, "abc123");
    assert_eq!(created.click_count, 0);
    assert!(created.last_accessed.is_none());

    let fetched = storage.get("abc123").await.unwrap();
    assert_eq!(fetched.target_url, "https://example.com");
    assert_eq!(fetched.click_count, 0);
    assert_eq!(
        fetched.created_at.timestamp(),
        created.created_at.timestamp()
    );
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (storage, _dir) = create_temp_storage().await;
    assert!(matches!(
        storage.get("nothere").await,
        Err(SnaplinkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_duplicate_insert_conflicts() {
    let (storage, _dir) = create_temp_storage().await;

    storage.insert("abc123", "https://first.example").await.unwrap();
    let err = storage
        .insert("abc123", "https://second.example")
        .await
        .unwrap_err();
    assert!(matches!(err, SnaplinkError::CodeConflict(_)));

    // 原记录不受影响
    let link = storage.get("abc123").await.unwrap();
    assert_eq!(link.target_url, "https://first.example");
    assert_eq!(storage.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_codes_are_case_sensitive() {
    let (storage, _dir) = create_temp_storage().await;

    storage.insert("AbCdEf", "https://upper.example").await.unwrap();
    storage.insert("abcdef", "https://lower.example").await.unwrap();

    assert_eq!(
        storage.get("AbCdEf").await.unwrap().target_url,
        "https://upper.example"
    );
    assert_eq!(
        storage.get("abcdef").await.unwrap().target_url,
        "https://lower.example"
    );
}

// =============================================================================
// Increment / delete
// =============================================================================

#[tokio::test]
async fn test_increment_and_touch() {
    let (storage, _dir) = create_temp_storage().await;
    storage.insert("abc123", "https://example.com").await.unwrap();

    let first = storage.increment_and_touch("abc123").await.unwrap();
    assert_eq!(first.click_count, 1);
    let first_access = first.last_accessed.expect("last_accessed set");

    let second = storage.increment_and_touch("abc123").await.unwrap();
    assert_eq!(second.click_count, 2);
    assert!(second.last_accessed.expect("last_accessed set") >= first_access);
    assert_eq!(second.target_url, "https://example.com");
}

#[tokio::test]
async fn test_increment_missing_is_not_found() {
    let (storage, _dir) = create_temp_storage().await;
    assert!(matches!(
        storage.increment_and_touch("nothere").await,
        Err(SnaplinkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete() {
    let (storage, _dir) = create_temp_storage().await;
    storage.insert("abc123", "https://example.com").await.unwrap();

    storage.delete("abc123").await.unwrap();
    assert!(matches!(
        storage.get("abc123").await,
        Err(SnaplinkError::NotFound(_))
    ));
    assert!(matches!(
        storage.delete("abc123").await,
        Err(SnaplinkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let (storage, _dir) = create_temp_storage().await;
    storage.insert("abc123", "https://old.example").await.unwrap();
    storage.increment_and_touch("abc123").await.unwrap();
    storage.delete("abc123").await.unwrap();

    let fresh = storage.insert("abc123", "https://new.example").await.unwrap();
    assert_eq!(fresh.click_count, 0);
    assert!(fresh.last_accessed.is_none());
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_newest_first() {
    let (storage, _dir) = create_temp_storage().await;
    for code in ["aaaaaa", "bbbbbb", "cccccc"] {
        storage.insert(code, "https://example.com").await.unwrap();
    }

    let page = storage.list_page(0, 10).await.unwrap();
    let codes: Vec<_> = page.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["cccccc", "bbbbbb", "aaaaaa"]);

    let second = storage.list_page(1, 2).await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].code, "aaaaaa");
}

#[tokio::test]
async fn test_list_same_created_at_falls_back_to_insertion_order() {
    let (storage, _dir) = create_temp_storage().await;
    let created_at = chrono::Utc::now();
    for code in ["tieAAA", "tieBBB", "tieCCC"] {
        short_link::Entity::insert(new_active_model(code, "https://example.com", created_at))
            .exec(storage.get_db())
            .await
            .unwrap();
    }

    let page = storage.list_page(0, 10).await.unwrap();
    let codes: Vec<_> = page.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["tieCCC", "tieBBB", "tieAAA"]);
    assert!(page.iter().all(|l| l.created_at == page[0].created_at));
}

#[tokio::test]
async fn test_list_empty_store() {
    let (storage, _dir) = create_temp_storage().await;
    assert!(storage.list_page(0, 10).await.unwrap().is_empty());
    assert_eq!(storage.count().await.unwrap(), 0);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    let (storage, _dir) = create_temp_storage().await;
    let storage = Arc::new(storage);
    storage.insert("hot001", "https://example.com").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage.increment_and_touch("hot001").await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(storage.get("hot001").await.unwrap().click_count, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_single_winner() {
    let (storage, _dir) = create_temp_storage().await;
    let storage = Arc::new(storage);

    let mut handles = Vec::new();
    for i in 0..10 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .insert("race01", &format!("https://{}.example", i))
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(SnaplinkError::CodeConflict(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(storage.count().await.unwrap(), 1);
}
