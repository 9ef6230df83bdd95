#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Identity persistence schema over `SeaORM`.
//!
//! This crate declares the relational schema for a user/role identity
//! subsystem — users, roles, claims, logins, role memberships, and tokens
//! — and exposes typed handles for querying and writing it. It is
//! declarative: keys, indexes, and relationships are registered with the
//! engine; storage behavior (transactions, constraint enforcement, SQL
//! dialects) belongs to `SeaORM`/`SQLx`.
//!
//! The table layout is wire-compatible with existing identity databases
//! (`AspNetUsers` and friends, including the `UserNameIndex` /
//! `EmailIndex` / `RoleNameIndex` lookup indexes).
//!
//! # Features
//! - `sqlite` (default), `pg`, `mysql`: backend driver selection
//!
//! # Example
//! ```rust,no_run
//! use identity_db::{ConnectOpts, IdentityDb, connect_db};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let conn = connect_db("sqlite::memory:", &ConnectOpts::default()).await?;
//! let db = IdentityDb::new(conn);
//! db.migrate().await?;
//!
//! let admins = db.roles().all(db.conn()).await?;
//! # let _ = admins;
//! # Ok(())
//! # }
//! ```

pub mod connect;
pub mod entity;
pub mod entity_traits;
pub mod migrations;
pub mod schema;
pub mod store;

pub use connect::{ConnectOpts, DbEngine, DbError, connect_db, detect};
pub use entity_traits::{ConcurrencyStamped, RoleOwned, UserOwned};
pub use migrations::Migrator;
pub use schema::{IdentitySchema, TableDef};
pub use store::IdentityDb;
