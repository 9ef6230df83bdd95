#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use identity_db::entity::{role, user, user_claim, user_login, user_role, user_token};
use identity_db::{ConnectOpts, IdentityDb, connect_db};
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

/// Fresh in-memory database with the identity schema applied.
pub async fn bring_up_identity_db() -> IdentityDb {
    let conn = connect_db("sqlite::memory:", &ConnectOpts::default())
        .await
        .expect("sqlite connect");
    let db = IdentityDb::new(conn);
    db.migrate().await.expect("identity migrations");
    db
}

pub fn user_fixture(user_name: &str, email: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_name: Set(Some(user_name.to_owned())),
        normalized_user_name: Set(Some(user_name.to_uppercase())),
        email: Set(Some(email.to_owned())),
        normalized_email: Set(Some(email.to_uppercase())),
        email_confirmed: Set(false),
        security_stamp: Set(Some(Uuid::new_v4().to_string())),
        phone_number_confirmed: Set(false),
        two_factor_enabled: Set(false),
        lockout_enabled: Set(true),
        access_failed_count: Set(0),
        ..Default::default()
    }
}

pub fn role_fixture(name: &str) -> role::ActiveModel {
    role::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(Some(name.to_owned())),
        normalized_name: Set(Some(name.to_uppercase())),
        ..Default::default()
    }
}

pub fn user_claim_fixture(user_id: Uuid, claim_type: &str, value: &str) -> user_claim::ActiveModel {
    user_claim::ActiveModel {
        user_id: Set(user_id),
        claim_type: Set(Some(claim_type.to_owned())),
        claim_value: Set(Some(value.to_owned())),
        ..Default::default()
    }
}

pub fn user_login_fixture(user_id: Uuid, provider: &str, key: &str) -> user_login::ActiveModel {
    user_login::ActiveModel {
        login_provider: Set(provider.to_owned()),
        provider_key: Set(key.to_owned()),
        provider_display_name: Set(Some(provider.to_owned())),
        user_id: Set(user_id),
    }
}

pub fn user_role_fixture(user_id: Uuid, role_id: Uuid) -> user_role::ActiveModel {
    user_role::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(role_id),
    }
}

pub fn user_token_fixture(user_id: Uuid, provider: &str, name: &str) -> user_token::ActiveModel {
    user_token::ActiveModel {
        user_id: Set(user_id),
        login_provider: Set(provider.to_owned()),
        name: Set(name.to_owned()),
        value: Set(Some("token-value".to_owned())),
    }
}
