use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::RoleOwned;

/// Key/value claim granted to every member of a role.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetRoleClaims")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "Id")]
    pub id: i32,
    #[sea_orm(column_name = "RoleId")]
    pub role_id: Uuid,
    #[sea_orm(column_name = "ClaimType")]
    pub claim_type: Option<String>,
    #[sea_orm(column_name = "ClaimValue")]
    pub claim_value: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl RoleOwned for Entity {
    fn role_fk_col() -> Self::Column {
        Column::RoleId
    }
}

impl ActiveModelBehavior for ActiveModel {}
