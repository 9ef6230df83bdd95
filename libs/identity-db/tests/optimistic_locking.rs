#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use identity_db::entity::{role, user};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DbErr, IntoActiveModel};

#[tokio::test]
async fn insert_seeds_a_concurrency_stamp() {
    let db = common::bring_up_identity_db().await;

    // the fixture leaves the stamp unset
    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();
    assert!(alice.concurrency_stamp.is_some());

    let admin = db.insert_role(common::role_fixture("admin")).await.unwrap();
    assert!(admin.concurrency_stamp.is_some());
}

#[tokio::test]
async fn checked_update_rotates_the_stamp() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();
    let stamp = alice.concurrency_stamp.clone().unwrap();

    let patch = user::ActiveModel {
        id: Set(alice.id),
        access_failed_count: Set(3),
        ..Default::default()
    };
    let updated = db.update_user(patch, &stamp).await.unwrap();

    assert_eq!(updated.access_failed_count, 3);
    assert_ne!(updated.concurrency_stamp.unwrap(), stamp);
}

#[tokio::test]
async fn stale_stamp_update_is_rejected() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();
    let stamp = alice.concurrency_stamp.clone().unwrap();

    let first = user::ActiveModel {
        id: Set(alice.id),
        phone_number: Set(Some("123".to_owned())),
        ..Default::default()
    };
    db.update_user(first, &stamp).await.unwrap();

    // second writer still holds the original stamp
    let second = user::ActiveModel {
        id: Set(alice.id),
        phone_number: Set(Some("456".to_owned())),
        ..Default::default()
    };
    let err = db.update_user(second, &stamp).await.unwrap_err();
    assert!(matches!(err, DbErr::RecordNotUpdated));
}

#[tokio::test]
async fn stale_stamp_role_update_is_rejected() {
    let db = common::bring_up_identity_db().await;

    let admin = db.insert_role(common::role_fixture("admin")).await.unwrap();
    let stamp = admin.concurrency_stamp.clone().unwrap();

    let rename = role::ActiveModel {
        id: Set(admin.id),
        name: Set(Some("administrators".to_owned())),
        normalized_name: Set(Some("ADMINISTRATORS".to_owned())),
        ..Default::default()
    };
    db.update_role(rename, &stamp).await.unwrap();

    let late = role::ActiveModel {
        id: Set(admin.id),
        name: Set(Some("ops".to_owned())),
        normalized_name: Set(Some("OPS".to_owned())),
        ..Default::default()
    };
    let err = db.update_role(late, &stamp).await.unwrap_err();
    assert!(matches!(err, DbErr::RecordNotUpdated));
}

#[tokio::test]
async fn orm_path_update_also_rotates_the_stamp() {
    let db = common::bring_up_identity_db().await;

    let alice = db
        .insert_user(common::user_fixture("alice", "alice@example.com"))
        .await
        .unwrap();
    let stamp = alice.concurrency_stamp.clone().unwrap();

    let mut active = alice.into_active_model();
    active.email_confirmed = Set(true);
    let updated: user::Model = active.update(db.conn()).await.unwrap();

    assert!(updated.email_confirmed);
    assert_ne!(updated.concurrency_stamp.unwrap(), stamp);
}

#[tokio::test]
async fn update_without_an_id_is_refused() {
    let db = common::bring_up_identity_db().await;

    let patch = user::ActiveModel {
        access_failed_count: Set(1),
        ..Default::default()
    };
    let err = db.update_user(patch, "whatever").await.unwrap_err();
    assert!(matches!(err, DbErr::AttrNotSet(_)));
}
