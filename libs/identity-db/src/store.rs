//! Typed query and write handles over the identity tables.
//!
//! [`IdentityDb`] is the table-handle surface host code works with: one
//! typed `Select` per table, generic child lookups through the ownership
//! traits, and write helpers that enforce the optimistic-concurrency
//! contract on users and roles.
//!
//! Constraint failures are not intercepted here: duplicate keys, foreign
//! key violations, and similar surface as [`sea_orm::DbErr`] from the
//! engine (see [`sea_orm::error::SqlErr`] for classification).

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Select,
};
use sea_orm_migration::MigratorTrait;
use tracing::debug;
use uuid::Uuid;

use crate::entity::{role, role_claim, user, user_claim, user_login, user_role, user_token};
use crate::entity_traits::{ConcurrencyStamped, RoleOwned, UserOwned};
use crate::migrations::Migrator;

/// Handle over an identity database.
#[derive(Clone, Debug)]
pub struct IdentityDb {
    conn: DatabaseConnection,
}

impl IdentityDb {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The underlying connection, for queries the typed surface doesn't
    /// cover.
    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Bring the identity tables up to date.
    ///
    /// # Errors
    /// Returns an error if a migration step fails.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        Migrator::up(&self.conn, None).await
    }

    // --- typed read handles ---

    #[must_use]
    pub fn users(&self) -> Select<user::Entity> {
        user::Entity::find()
    }

    #[must_use]
    pub fn roles(&self) -> Select<role::Entity> {
        role::Entity::find()
    }

    #[must_use]
    pub fn user_claims(&self) -> Select<user_claim::Entity> {
        user_claim::Entity::find()
    }

    #[must_use]
    pub fn role_claims(&self) -> Select<role_claim::Entity> {
        role_claim::Entity::find()
    }

    #[must_use]
    pub fn user_roles(&self) -> Select<user_role::Entity> {
        user_role::Entity::find()
    }

    #[must_use]
    pub fn user_logins(&self) -> Select<user_login::Entity> {
        user_login::Entity::find()
    }

    #[must_use]
    pub fn user_tokens(&self) -> Select<user_token::Entity> {
        user_token::Entity::find()
    }

    /// Rows of a user-owned table belonging to `user_id`.
    #[must_use]
    pub fn children_of_user<E: UserOwned>(&self, user_id: Uuid) -> Select<E> {
        E::find().filter(E::user_fk_col().eq(user_id))
    }

    /// Rows of a role-owned table belonging to `role_id`.
    #[must_use]
    pub fn children_of_role<E: RoleOwned>(&self, role_id: Uuid) -> Select<E> {
        E::find().filter(E::role_fk_col().eq(role_id))
    }

    // --- write helpers ---

    /// Insert a user. A concurrency stamp is seeded when the caller did
    /// not set one.
    ///
    /// # Errors
    /// Returns the engine error, e.g. a unique-index violation on the
    /// normalized username or email.
    pub async fn insert_user(&self, user: user::ActiveModel) -> Result<user::Model, DbErr> {
        user.insert(&self.conn).await
    }

    /// Update a user, guarded by the concurrency stamp the caller last
    /// observed. The stamp is rotated as part of the update.
    ///
    /// # Errors
    /// Returns [`DbErr::RecordNotUpdated`] when the stored stamp no longer
    /// matches `expected_stamp` (a concurrent writer got there first), or
    /// the engine error for any other failure.
    pub async fn update_user(
        &self,
        user: user::ActiveModel,
        expected_stamp: &str,
    ) -> Result<user::Model, DbErr> {
        let id = match &user.id {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
            ActiveValue::NotSet => return Err(DbErr::AttrNotSet("Id".to_owned())),
        };

        let mut user = user;
        user.id = ActiveValue::NotSet;
        user.concurrency_stamp = ActiveValue::Set(Some(user::Entity::fresh_stamp()));

        let res = user::Entity::update_many()
            .set(user)
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::ConcurrencyStamp.eq(expected_stamp))
            .exec(&self.conn)
            .await?;

        if res.rows_affected == 0 {
            debug!(user_id = %id, "stale concurrency stamp on user update");
            return Err(DbErr::RecordNotUpdated);
        }

        user::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id} after update")))
    }

    /// Delete a user by id. Owned claims, logins, role links, and tokens
    /// go with it at engine level.
    ///
    /// # Errors
    /// Returns the engine error if the delete fails.
    pub async fn delete_user(&self, id: Uuid) -> Result<u64, DbErr> {
        let res = user::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected)
    }

    /// Insert a role. A concurrency stamp is seeded when the caller did
    /// not set one.
    ///
    /// # Errors
    /// Returns the engine error, e.g. a unique-index violation on the
    /// normalized name.
    pub async fn insert_role(&self, role: role::ActiveModel) -> Result<role::Model, DbErr> {
        role.insert(&self.conn).await
    }

    /// Update a role, guarded by the concurrency stamp the caller last
    /// observed. The stamp is rotated as part of the update.
    ///
    /// # Errors
    /// Returns [`DbErr::RecordNotUpdated`] when the stored stamp no longer
    /// matches `expected_stamp`, or the engine error for any other
    /// failure.
    pub async fn update_role(
        &self,
        role: role::ActiveModel,
        expected_stamp: &str,
    ) -> Result<role::Model, DbErr> {
        let id = match &role.id {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
            ActiveValue::NotSet => return Err(DbErr::AttrNotSet("Id".to_owned())),
        };

        let mut role = role;
        role.id = ActiveValue::NotSet;
        role.concurrency_stamp = ActiveValue::Set(Some(role::Entity::fresh_stamp()));

        let res = role::Entity::update_many()
            .set(role)
            .filter(role::Column::Id.eq(id))
            .filter(role::Column::ConcurrencyStamp.eq(expected_stamp))
            .exec(&self.conn)
            .await?;

        if res.rows_affected == 0 {
            debug!(role_id = %id, "stale concurrency stamp on role update");
            return Err(DbErr::RecordNotUpdated);
        }

        role::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("role {id} after update")))
    }

    /// Delete a role by id. Role claims and membership links go with it.
    ///
    /// # Errors
    /// Returns the engine error if the delete fails.
    pub async fn delete_role(&self, id: Uuid) -> Result<u64, DbErr> {
        let res = role::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(res.rows_affected)
    }
}
