use std::error::Error;

use backend::adapters::users_sea::UsersSea;
use backend::config::db::DbProfile;
use backend::entities::UserRole;
use backend::errors::domain::{ConflictKind, DomainError};
use backend::infra::db::bootstrap_db;
use backend::repos::users::UserStore;

async fn store() -> Result<UsersSea, Box<dyn Error>> {
    Ok(UsersSea::new(bootstrap_db(DbProfile::InMemory).await?))
}

#[tokio::test]
async fn create_and_look_up_users() -> Result<(), Box<dyn Error>> {
    let users = store().await?;

    let alice = users.create_user("alice", "salt$hash", UserRole::User).await?;
    let root = users.create_user("root", "salt$hash", UserRole::Admin).await?;

    let found = users.find_by_id(alice.id).await?.expect("alice");
    assert_eq!(found.username, "alice");
    assert_eq!(found.password_hash, "salt$hash");
    assert_eq!(found.role, UserRole::User);
    assert_eq!(users.find_by_username("root").await?.map(|u| u.role), Some(UserRole::Admin));
    assert!(users.find_by_username("nobody").await?.is_none());

    let all: Vec<String> = users.list_users().await?.into_iter().map(|u| u.username).collect();
    assert_eq!(all, vec!["alice".to_string(), "root".to_string()]);

    let profile = users.find_profile(root.id).await?.expect("profile");
    assert_eq!(profile.username, "root");
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_unique_conflict() -> Result<(), Box<dyn Error>> {
    let users = store().await?;
    users.create_user("bob", "h", UserRole::User).await?;

    let err = users.create_user("bob", "h", UserRole::User).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::UniqueUsername, _)));
    Ok(())
}

#[tokio::test]
async fn delete_reports_whether_a_row_went() -> Result<(), Box<dyn Error>> {
    let users = store().await?;
    let carol = users.create_user("carol", "h", UserRole::User).await?;

    assert!(users.delete_by_username("carol").await?);
    assert!(!users.delete_by_username("carol").await?);
    assert!(users.find_by_id(carol.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn password_hash_can_be_replaced() -> Result<(), Box<dyn Error>> {
    let users = store().await?;
    let carol = users.create_user("carol", "old$digest", UserRole::User).await?;

    assert!(users.update_password_hash(carol.id, "$argon2id$v=19$new").await?);
    let found = users.find_by_id(carol.id).await?.expect("carol");
    assert_eq!(found.password_hash, "$argon2id$v=19$new");

    assert!(!users.update_password_hash(carol.id + 100, "x").await?);
    Ok(())
}
