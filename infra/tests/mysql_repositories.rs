//! MySQL repository tests
//!
//! Require a disposable database: `DATABASE_URL=mysql://... cargo test -- --ignored`

use chrono::{Duration, Utc};

use lb_core::domain::entities::blob::BlobMeta;
use lb_core::domain::entities::user::NewUser;
use lb_core::errors::{AuthError, DomainError};
use lb_core::repositories::{BlobMetaRepository, RefreshTokenRepository, UserRepository};
use lb_infra::{DatabasePool, MySqlBlobMetaRepository, MySqlRefreshTokenRepository, MySqlUserRepository};
use lb_shared::DatabaseConfig;

const SCHEMA: &str = include_str!("../migrations/0001_init.sql");

async fn setup() -> DatabasePool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = DatabasePool::new(&DatabaseConfig::new(url)).await.unwrap();

    for table in ["encrypted_files", "refresh_tokens", "users"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool.get_pool())
            .await
            .unwrap();
    }
    let statements = SCHEMA
        .split(';')
        .map(|s| s.lines().filter(|l| !l.trim_start().starts_with("--")).collect::<Vec<_>>().join("\n"))
        .filter(|s| !s.trim().is_empty());
    for statement in statements {
        sqlx::query(&statement).execute(pool.get_pool()).await.unwrap();
    }
    pool
}

fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

#[tokio::test]
#[ignore] // Requires actual database
async fn user_repository_round_trip_and_duplicates() {
    let pool = setup().await;
    let repo = MySqlUserRepository::new(pool.get_pool().clone());
    let email = unique_email("user");

    let created = repo.create(NewUser::new(&email, "hash")).await.unwrap();
    let found = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(repo.find_by_id(created.id).await.unwrap().unwrap().email, email);

    let duplicate = repo.create(NewUser::new(&email, "other")).await;
    assert!(matches!(duplicate, Err(DomainError::Auth(AuthError::UserAlreadyExists))));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn refresh_token_upsert_keeps_one_row_per_user() {
    let pool = setup().await;
    let users = MySqlUserRepository::new(pool.get_pool().clone());
    let tokens = MySqlRefreshTokenRepository::new(pool.get_pool().clone());
    let user = users.create(NewUser::new(unique_email("tok"), "hash")).await.unwrap();
    let expires_at = Utc::now() + Duration::hours(1);

    tokens.put(user.id, "first", expires_at).await.unwrap();
    tokens.put(user.id, "second", expires_at).await.unwrap();

    assert!(tokens.get("first").await.unwrap_err().is_not_found());
    assert_eq!(tokens.get("second").await.unwrap().user_id, user.id);

    tokens.put(user.id, "stale", Utc::now() - Duration::seconds(5)).await.unwrap();
    assert!(tokens.get("stale").await.unwrap_err().is_not_found());

    tokens.delete("stale").await.unwrap();
    tokens.delete("stale").await.unwrap();
}

#[tokio::test]
#[ignore] // Requires actual database
async fn blob_metadata_upsert_keeps_created_at() {
    let pool = setup().await;
    let users = MySqlUserRepository::new(pool.get_pool().clone());
    let metas = MySqlBlobMetaRepository::new(pool.get_pool().clone());
    let user = users.create(NewUser::new(unique_email("blob"), "hash")).await.unwrap();
    let first = Utc::now() - Duration::minutes(10);

    metas.save(&BlobMeta::new(user.id, "a.enc", first)).await.unwrap();
    metas.save(&BlobMeta::new(user.id, "a.enc", Utc::now())).await.unwrap();

    let listed = metas.list(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].created_at.timestamp(), first.timestamp());
    assert!(metas.exists(user.id, "a.enc").await.unwrap());
    assert!(metas.delete(user.id, "a.enc").await.unwrap());
    assert!(!metas.delete(user.id, "a.enc").await.unwrap());
}
