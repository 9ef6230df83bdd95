//! SeaORM entities for the seven identity tables.
//!
//! Table, column, and index identifiers keep the original PascalCase names
//! so the mapping stays wire-compatible with existing identity databases.

pub mod role;
pub mod role_claim;
pub mod user;
pub mod user_claim;
pub mod user_login;
pub mod user_role;
pub mod user_token;
