//! Capability contracts over the identity entities.
//!
//! The generic machinery in this crate (stamp-checked updates, child
//! lookups) works through these traits rather than concrete entity types,
//! so a host that substitutes its own entity definitions keeps the
//! machinery: implement the relevant trait for the replacement entity and
//! the helpers in [`crate::store`] accept it unchanged.

use sea_orm::EntityTrait;
use uuid::Uuid;

/// An entity carrying an optimistic-concurrency stamp column.
///
/// The stamp must differ between any two saved versions of a row; writers
/// compare the stamp they last observed against the stored one to detect
/// lost updates.
pub trait ConcurrencyStamped: EntityTrait {
    /// Column holding the concurrency stamp.
    fn stamp_col() -> Self::Column;

    /// Produce a stamp value that has never been used for this row.
    #[must_use]
    fn fresh_stamp() -> String {
        Uuid::new_v4().to_string()
    }
}

/// A child entity owned by a user through a required foreign key.
pub trait UserOwned: EntityTrait {
    /// Column holding the owning user's id.
    fn user_fk_col() -> Self::Column;
}

/// A child entity owned by a role through a required foreign key.
pub trait RoleOwned: EntityTrait {
    /// Column holding the owning role's id.
    fn role_fk_col() -> Self::Column;
}
