use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::{RoleOwned, UserOwned};

/// Join row linking a user to a role. Composite primary key
/// `(UserId, RoleId)`; both sides are required.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetUserRoles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "UserId")]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false, column_name = "RoleId")]
    pub role_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl UserOwned for Entity {
    fn user_fk_col() -> Self::Column {
        Column::UserId
    }
}

impl RoleOwned for Entity {
    fn role_fk_col() -> Self::Column {
        Column::RoleId
    }
}

impl ActiveModelBehavior for ActiveModel {}
