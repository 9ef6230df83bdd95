use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::ConcurrencyStamped;

/// Identity principal. Rows live in `AspNetUsers`; the normalized
/// username/email columns back the case-insensitive lookup indexes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetUsers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
    pub id: Uuid,
    #[sea_orm(column_name = "UserName")]
    pub user_name: Option<String>,
    #[sea_orm(column_name = "NormalizedUserName")]
    pub normalized_user_name: Option<String>,
    #[sea_orm(column_name = "Email")]
    pub email: Option<String>,
    #[sea_orm(column_name = "NormalizedEmail")]
    pub normalized_email: Option<String>,
    #[sea_orm(column_name = "EmailConfirmed")]
    pub email_confirmed: bool,
    #[sea_orm(column_name = "PasswordHash")]
    pub password_hash: Option<String>,
    #[sea_orm(column_name = "SecurityStamp")]
    pub security_stamp: Option<String>,
    #[sea_orm(column_name = "ConcurrencyStamp")]
    pub concurrency_stamp: Option<String>,
    #[sea_orm(column_name = "PhoneNumber")]
    pub phone_number: Option<String>,
    #[sea_orm(column_name = "PhoneNumberConfirmed")]
    pub phone_number_confirmed: bool,
    #[sea_orm(column_name = "TwoFactorEnabled")]
    pub two_factor_enabled: bool,
    #[sea_orm(column_name = "LockoutEnd")]
    pub lockout_end: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_name = "LockoutEnabled")]
    pub lockout_enabled: bool,
    #[sea_orm(column_name = "AccessFailedCount")]
    pub access_failed_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_claim::Entity")]
    UserClaims,
    #[sea_orm(has_many = "super::user_login::Entity")]
    UserLogins,
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
    #[sea_orm(has_many = "super::user_token::Entity")]
    UserTokens,
}

impl Related<super::user_claim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserClaims.def()
    }
}

impl Related<super::user_login::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLogins.def()
    }
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::user_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTokens.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ConcurrencyStamped for Entity {
    fn stamp_col() -> Self::Column {
        Column::ConcurrencyStamp
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    // The stamp must differ between any two saved versions of a row so a
    // stale writer can be detected by value comparison.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert || !matches!(self.concurrency_stamp, ActiveValue::Set(Some(_))) {
            self.concurrency_stamp = ActiveValue::Set(Some(Entity::fresh_stamp()));
        }
        Ok(self)
    }
}
