//! Declarative schema builder for the identity tables.
//!
//! [`IdentitySchema`] holds one table-definition function per entity kind.
//! The defaults implement the compatibility schema (`AspNetUsers` and
//! friends); each step can be replaced independently, so a consumer
//! customizes a single entity's mapping without re-declaring the rest:
//!
//! ```rust,ignore
//! let schema = IdentitySchema::default().with_user_tokens(|| {
//!     let mut def = tables::user_tokens();
//!     def.create.col(ColumnDef::new(Alias::new("ExpiresAt")).timestamp_with_time_zone());
//!     def
//! });
//! ```
//!
//! The builder runs once, synchronously, at model-build time. It has no
//! error conditions of its own; a structurally invalid definition surfaces
//! from the persistence engine when the statements execute.

pub mod tables;

use sea_orm_migration::prelude::*;

/// One table's DDL: the create statement plus its secondary indexes.
pub struct TableDef {
    pub create: TableCreateStatement,
    pub indexes: Vec<IndexCreateStatement>,
}

impl TableDef {
    /// Drop statement for this table, if the definition names one.
    #[must_use]
    pub fn drop_stmt(&self) -> Option<TableDropStatement> {
        self.create
            .get_table_name()
            .map(|table| Table::drop().table(table.clone()).to_owned())
    }
}

type TableFn = Box<dyn Fn() -> TableDef + Send + Sync>;

/// Replaceable per-entity table definitions for the identity schema.
pub struct IdentitySchema {
    users: TableFn,
    roles: TableFn,
    user_claims: TableFn,
    role_claims: TableFn,
    user_roles: TableFn,
    user_logins: TableFn,
    user_tokens: TableFn,
}

impl Default for IdentitySchema {
    fn default() -> Self {
        Self {
            users: Box::new(tables::users),
            roles: Box::new(tables::roles),
            user_claims: Box::new(tables::user_claims),
            role_claims: Box::new(tables::role_claims),
            user_roles: Box::new(tables::user_roles),
            user_logins: Box::new(tables::user_logins),
            user_tokens: Box::new(tables::user_tokens),
        }
    }
}

impl IdentitySchema {
    #[must_use]
    pub fn with_users<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.users = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_roles<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.roles = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_user_claims<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.user_claims = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_role_claims<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.role_claims = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_user_roles<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.user_roles = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_user_logins<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.user_logins = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_user_tokens<F>(mut self, f: F) -> Self
    where
        F: Fn() -> TableDef + Send + Sync + 'static,
    {
        self.user_tokens = Box::new(f);
        self
    }

    /// All seven table definitions, parents before children so foreign
    /// keys resolve when the statements run in order. Reverse for drops.
    #[must_use]
    pub fn table_defs(&self) -> Vec<TableDef> {
        vec![
            (self.users)(),
            (self.roles)(),
            (self.user_claims)(),
            (self.role_claims)(),
            (self.user_roles)(),
            (self.user_logins)(),
            (self.user_tokens)(),
        ]
    }
}
