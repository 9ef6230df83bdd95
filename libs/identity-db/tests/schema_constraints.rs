#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use identity_db::entity::user_claim;
use sea_orm::{ActiveModelTrait, SqlErr};
use uuid::Uuid;

#[tokio::test]
async fn duplicate_normalized_user_name_is_rejected() {
    let db = common::bring_up_identity_db().await;

    db.insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();

    // different casing, same normalized form
    let err = db
        .insert_user(common::user_fixture("Alice", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn duplicate_normalized_email_is_rejected() {
    let db = common::bring_up_identity_db().await;

    db.insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();

    let err = db
        .insert_user(common::user_fixture("bob", "Alice@Example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn duplicate_normalized_role_name_is_rejected() {
    let db = common::bring_up_identity_db().await;

    db.insert_role(common::role_fixture("admin")).await.unwrap();

    let err = db
        .insert_role(common::role_fixture("Admin"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn duplicate_login_provider_key_is_rejected() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = db
        .insert_user(common::user_fixture("bob", "bob@example.com"))
        .await
        .unwrap();

    common::user_login_fixture(alice.id, "github", "gh-123")
        .insert(db.conn())
        .await
        .unwrap();

    // same provider pair, even for another user
    let err = common::user_login_fixture(bob.id, "github", "gh-123")
        .insert(db.conn())
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn duplicate_user_token_key_is_rejected() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();

    common::user_token_fixture(alice.id, "github", "refresh")
        .insert(db.conn())
        .await
        .unwrap();

    let err = common::user_token_fixture(alice.id, "github", "refresh")
        .insert(db.conn())
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    // a different token name under the same provider is fine
    common::user_token_fixture(alice.id, "github", "access")
        .insert(db.conn())
        .await
        .unwrap();
}

#[tokio::test]
async fn child_rows_require_an_existing_owner() {
    let db = common::bring_up_identity_db().await;

    let err = common::user_claim_fixture(Uuid::new_v4(), "dept", "eng")
        .insert(db.conn())
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::ForeignKeyConstraintViolation(_))
    ));
}

#[tokio::test]
async fn membership_requires_both_sides() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();

    // role id that was never inserted
    let err = common::user_role_fixture(alice.id, Uuid::new_v4())
        .insert(db.conn())
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::ForeignKeyConstraintViolation(_))
    ));
}

#[tokio::test]
async fn claims_get_surrogate_ids() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();

    let first: user_claim::Model = common::user_claim_fixture(alice.id, "dept", "eng")
        .insert(db.conn())
        .await
        .unwrap();
    let second = common::user_claim_fixture(alice.id, "dept", "ops")
        .insert(db.conn())
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}
