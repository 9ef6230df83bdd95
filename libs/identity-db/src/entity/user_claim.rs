use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::UserOwned;

/// Key/value claim asserted about a user. Surrogate-keyed; rows are owned
/// by their user and go away with it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetUserClaims")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "Id")]
    pub id: i32,
    #[sea_orm(column_name = "UserId")]
    pub user_id: Uuid,
    #[sea_orm(column_name = "ClaimType")]
    pub claim_type: Option<String>,
    #[sea_orm(column_name = "ClaimValue")]
    pub claim_value: Option<String>,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl UserOwned for Entity {
    fn user_fk_col() -> Self::Column {
        Column::UserId
    }
}

impl ActiveModelBehavior for ActiveModel {}
