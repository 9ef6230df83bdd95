use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::UserOwned;

/// Named token value stored for a user per provider, e.g. a recovery code
/// or a refresh token issued by an external provider.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetUserTokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "UserId")]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false, column_name = "LoginProvider")]
    pub login_provider: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "Name")]
    pub name: String,
    #[sea_orm(column_name = "Value")]
    pub value: Option<String>,
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
