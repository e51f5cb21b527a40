//! Unit tests for the user entity

use chrono::Utc;

use crate::domain::entities::user::NewUser;

#[test]
fn test_new_user_into_user() {
    let now = Utc::now();
    let user = NewUser::new("a@example.com", "hash").into_user(3, now);

    assert_eq!(user.id, 3);
    assert_eq!(user.email, "a@example.com");
    assert_eq!(user.password_hash, "hash");
    assert_eq!(user.created_at, now);
    assert_eq!(user.updated_at, now);
}

#[test]
fn test_password_hash_is_never_serialized() {
    let user = NewUser::new("a@example.com", "$2b$04$secret").into_user(1, Utc::now());
    let json = serde_json::to_string(&user).unwrap();

    assert!(json.contains("a@example.com"));
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("secret"));
}
