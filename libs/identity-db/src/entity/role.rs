use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::ConcurrencyStamped;

/// Named permission group, stored in `AspNetRoles`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetRoles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
    pub id: Uuid,
    #[sea_orm(column_name = "Name")]
    pub name: Option<String>,
    #[sea_orm(column_name = "NormalizedName")]
    pub normalized_name: Option<String>,
    #[sea_orm(column_name = "ConcurrencyStamp")]
    pub concurrency_stamp: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_claim::Entity")]
    RoleClaims,
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::role_claim::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleClaims.def()
    }
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::Role.def().rev())
    }
}

impl ConcurrencyStamped for Entity {
    fn stamp_col() -> Self::Column {
        Column::ConcurrencyStamp
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
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
