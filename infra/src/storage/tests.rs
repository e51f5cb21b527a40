//! Unit tests for disk blob storage

use lb_core::errors::DomainError;
use lb_core::repositories::BlobStorage;
use lb_core::services::blob::MAX_FILENAME_LENGTH;

use super::DiskBlobStorage;

#[tokio::test]
async fn test_new_creates_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("uploads");

    let storage = DiskBlobStorage::new(&root).await.unwrap();

    assert!(root.is_dir());
    assert_eq!(storage.root(), root.as_path());
}

#[tokio::test]
async fn test_save_read_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskBlobStorage::new(dir.path()).await.unwrap();

    storage.save(7, "vault.enc", b"first").await.unwrap();
    storage.save(7, "vault.enc", b"second").await.unwrap();

    assert_eq!(storage.read(7, "vault.enc").await.unwrap(), b"second");
    assert!(dir.path().join("7").join("vault.enc").is_file());
    let staged: Vec<_> = std::fs::read_dir(dir.path().join(".staging")).unwrap().collect();
    assert!(staged.is_empty());
}

#[tokio::test]
async fn test_users_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskBlobStorage::new(dir.path()).await.unwrap();

    storage.save(1, "a.enc", b"one").await.unwrap();

    assert!(matches!(
        storage.read(2, "a.enc").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_missing_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskBlobStorage::new(dir.path()).await.unwrap();

    storage.save(1, "a.enc", b"one").await.unwrap();
    storage.delete(1, "a.enc").await.unwrap();
    storage.delete(1, "a.enc").await.unwrap();

    assert!(storage.read(1, "a.enc").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskBlobStorage::new(dir.path().join("root")).await.unwrap();

    let result = storage.save(1, "../../escape", b"x").await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
    assert!(!dir.path().join("escape").exists());
}

#[tokio::test]
async fn test_dotted_name_survives_upload_of_similar_name() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskBlobStorage::new(dir.path()).await.unwrap();

    storage.save(1, ".notes.partial", b"precious").await.unwrap();
    storage.save(1, "notes", b"other").await.unwrap();

    assert_eq!(storage.read(1, ".notes.partial").await.unwrap(), b"precious");
    assert_eq!(storage.read(1, "notes").await.unwrap(), b"other");
}

#[tokio::test]
async fn test_longest_accepted_name_is_writable() {
    let dir = tempfile::tempdir().unwrap();
    let storage = DiskBlobStorage::new(dir.path()).await.unwrap();
    let name = "a".repeat(MAX_FILENAME_LENGTH);

    storage.save(3, &name, b"edge").await.unwrap();

    assert_eq!(storage.read(3, &name).await.unwrap(), b"edge");
    assert!(matches!(
        storage.save(3, &"a".repeat(MAX_FILENAME_LENGTH + 1), b"x").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads_of_same_name_publish_whole_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let storage = std::sync::Arc::new(DiskBlobStorage::new(dir.path()).await.unwrap());
    let payloads: Vec<Vec<u8>> = (0..8u8).map(|i| vec![i; 4096]).collect();

    let mut handles = Vec::new();
    for payload in payloads.clone() {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage.save(5, "shared.enc", &payload).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = storage.read(5, "shared.enc").await.unwrap();
    assert!(payloads.contains(&stored));
}
