use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::entity_traits::UserOwned;

/// External login provider credential. The provider pair is the primary
/// key: one `(LoginProvider, ProviderKey)` maps to at most one user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "AspNetUserLogins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "LoginProvider")]
    pub login_provider: String,
    #[sea_orm(primary_key, auto_increment = false, column_name = "ProviderKey")]
    pub provider_key: String,
    #[sea_orm(column_name = "ProviderDisplayName")]
    pub provider_display_name: Option<String>,
    #[sea_orm(column_name = "UserId")]
    pub user_id: Uuid,
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
