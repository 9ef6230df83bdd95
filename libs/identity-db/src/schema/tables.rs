//! Default table definitions for the identity schema.
//!
//! Identifier enums are public so schema overrides can reference the same
//! names instead of spelling them out again.

use sea_orm_migration::prelude::*;

use super::TableDef;

#[derive(DeriveIden)]
pub enum Users {
    #[sea_orm(iden = "AspNetUsers")]
    Table,
    #[sea_orm(iden = "Id")]
    Id,
    #[sea_orm(iden = "UserName")]
    UserName,
    #[sea_orm(iden = "NormalizedUserName")]
    NormalizedUserName,
    #[sea_orm(iden = "Email")]
    Email,
    #[sea_orm(iden = "NormalizedEmail")]
    NormalizedEmail,
    #[sea_orm(iden = "EmailConfirmed")]
    EmailConfirmed,
    #[sea_orm(iden = "PasswordHash")]
    PasswordHash,
    #[sea_orm(iden = "SecurityStamp")]
    SecurityStamp,
    #[sea_orm(iden = "ConcurrencyStamp")]
    ConcurrencyStamp,
    #[sea_orm(iden = "PhoneNumber")]
    PhoneNumber,
    #[sea_orm(iden = "PhoneNumberConfirmed")]
    PhoneNumberConfirmed,
    #[sea_orm(iden = "TwoFactorEnabled")]
    TwoFactorEnabled,
    #[sea_orm(iden = "LockoutEnd")]
    LockoutEnd,
    #[sea_orm(iden = "LockoutEnabled")]
    LockoutEnabled,
    #[sea_orm(iden = "AccessFailedCount")]
    AccessFailedCount,
}

#[derive(DeriveIden)]
pub enum Roles {
    #[sea_orm(iden = "AspNetRoles")]
    Table,
    #[sea_orm(iden = "Id")]
    Id,
    #[sea_orm(iden = "Name")]
    Name,
    #[sea_orm(iden = "NormalizedName")]
    NormalizedName,
    #[sea_orm(iden = "ConcurrencyStamp")]
    ConcurrencyStamp,
}

#[derive(DeriveIden)]
pub enum UserClaims {
    #[sea_orm(iden = "AspNetUserClaims")]
    Table,
    #[sea_orm(iden = "Id")]
    Id,
    #[sea_orm(iden = "UserId")]
    UserId,
    #[sea_orm(iden = "ClaimType")]
    ClaimType,
    #[sea_orm(iden = "ClaimValue")]
    ClaimValue,
}

#[derive(DeriveIden)]
pub enum RoleClaims {
    #[sea_orm(iden = "AspNetRoleClaims")]
    Table,
    #[sea_orm(iden = "Id")]
    Id,
    #[sea_orm(iden = "RoleId")]
    RoleId,
    #[sea_orm(iden = "ClaimType")]
    ClaimType,
    #[sea_orm(iden = "ClaimValue")]
    ClaimValue,
}

#[derive(DeriveIden)]
pub enum UserRoles {
    #[sea_orm(iden = "AspNetUserRoles")]
    Table,
    #[sea_orm(iden = "UserId")]
    UserId,
    #[sea_orm(iden = "RoleId")]
    RoleId,
}

#[derive(DeriveIden)]
pub enum UserLogins {
    #[sea_orm(iden = "AspNetUserLogins")]
    Table,
    #[sea_orm(iden = "LoginProvider")]
    LoginProvider,
    #[sea_orm(iden = "ProviderKey")]
    ProviderKey,
    #[sea_orm(iden = "ProviderDisplayName")]
    ProviderDisplayName,
    #[sea_orm(iden = "UserId")]
    UserId,
}

#[derive(DeriveIden)]
pub enum UserTokens {
    #[sea_orm(iden = "AspNetUserTokens")]
    Table,
    #[sea_orm(iden = "UserId")]
    UserId,
    #[sea_orm(iden = "LoginProvider")]
    LoginProvider,
    #[sea_orm(iden = "Name")]
    Name,
    #[sea_orm(iden = "Value")]
    Value,
}

/// Default `AspNetUsers` mapping: uuid primary key, 256-char bounded
/// name/email columns, unique lookup indexes over the normalized forms.
#[must_use]
pub fn users() -> TableDef {
    let create = Table::create()
        .table(Users::Table)
        .if_not_exists()
        .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Users::UserName).string_len(256))
        .col(ColumnDef::new(Users::NormalizedUserName).string_len(256))
        .col(ColumnDef::new(Users::Email).string_len(256))
        .col(ColumnDef::new(Users::NormalizedEmail).string_len(256))
        .col(ColumnDef::new(Users::EmailConfirmed).boolean().not_null())
        .col(ColumnDef::new(Users::PasswordHash).text())
        .col(ColumnDef::new(Users::SecurityStamp).text())
        .col(ColumnDef::new(Users::ConcurrencyStamp).text())
        .col(ColumnDef::new(Users::PhoneNumber).text())
        .col(
            ColumnDef::new(Users::PhoneNumberConfirmed)
                .boolean()
                .not_null(),
        )
        .col(ColumnDef::new(Users::TwoFactorEnabled).boolean().not_null())
        .col(ColumnDef::new(Users::LockoutEnd).timestamp_with_time_zone())
        .col(ColumnDef::new(Users::LockoutEnabled).boolean().not_null())
        .col(ColumnDef::new(Users::AccessFailedCount).integer().not_null())
        .to_owned();

    let indexes = vec![
        Index::create()
            .name("UserNameIndex")
            .table(Users::Table)
            .col(Users::NormalizedUserName)
            .unique()
            .to_owned(),
        Index::create()
            .name("EmailIndex")
            .table(Users::Table)
            .col(Users::NormalizedEmail)
            .unique()
            .to_owned(),
    ];

    TableDef { create, indexes }
}

/// Default `AspNetRoles` mapping with the unique `RoleNameIndex` lookup.
#[must_use]
pub fn roles() -> TableDef {
    let create = Table::create()
        .table(Roles::Table)
        .if_not_exists()
        .col(ColumnDef::new(Roles::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Roles::Name).string_len(256))
        .col(ColumnDef::new(Roles::NormalizedName).string_len(256))
        .col(ColumnDef::new(Roles::ConcurrencyStamp).text())
        .to_owned();

    let indexes = vec![
        Index::create()
            .name("RoleNameIndex")
            .table(Roles::Table)
            .col(Roles::NormalizedName)
            .unique()
            .to_owned(),
    ];

    TableDef { create, indexes }
}

/// Default `AspNetUserClaims` mapping: surrogate id, required owning user.
#[must_use]
pub fn user_claims() -> TableDef {
    let create = Table::create()
        .table(UserClaims::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(UserClaims::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(UserClaims::UserId).uuid().not_null())
        .col(ColumnDef::new(UserClaims::ClaimType).text())
        .col(ColumnDef::new(UserClaims::ClaimValue).text())
        .foreign_key(
            ForeignKey::create()
                .name("FK_AspNetUserClaims_AspNetUsers_UserId")
                .from(UserClaims::Table, UserClaims::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();

    let indexes = vec![
        Index::create()
            .name("IX_AspNetUserClaims_UserId")
            .table(UserClaims::Table)
            .col(UserClaims::UserId)
            .to_owned(),
    ];

    TableDef { create, indexes }
}

/// Default `AspNetRoleClaims` mapping: surrogate id, required owning role.
#[must_use]
pub fn role_claims() -> TableDef {
    let create = Table::create()
        .table(RoleClaims::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(RoleClaims::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(RoleClaims::RoleId).uuid().not_null())
        .col(ColumnDef::new(RoleClaims::ClaimType).text())
        .col(ColumnDef::new(RoleClaims::ClaimValue).text())
        .foreign_key(
            ForeignKey::create()
                .name("FK_AspNetRoleClaims_AspNetRoles_RoleId")
                .from(RoleClaims::Table, RoleClaims::RoleId)
                .to(Roles::Table, Roles::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();

    let indexes = vec![
        Index::create()
            .name("IX_AspNetRoleClaims_RoleId")
            .table(RoleClaims::Table)
            .col(RoleClaims::RoleId)
            .to_owned(),
    ];

    TableDef { create, indexes }
}

/// Default `AspNetUserRoles` mapping: composite `(UserId, RoleId)` key,
/// both sides required.
#[must_use]
pub fn user_roles() -> TableDef {
    let create = Table::create()
        .table(UserRoles::Table)
        .if_not_exists()
        .col(ColumnDef::new(UserRoles::UserId).uuid().not_null())
        .col(ColumnDef::new(UserRoles::RoleId).uuid().not_null())
        .primary_key(
            Index::create()
                .col(UserRoles::UserId)
                .col(UserRoles::RoleId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("FK_AspNetUserRoles_AspNetUsers_UserId")
                .from(UserRoles::Table, UserRoles::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("FK_AspNetUserRoles_AspNetRoles_RoleId")
                .from(UserRoles::Table, UserRoles::RoleId)
                .to(Roles::Table, Roles::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();

    // UserId lookups ride the primary key prefix; RoleId needs its own.
    let indexes = vec![
        Index::create()
            .name("IX_AspNetUserRoles_RoleId")
            .table(UserRoles::Table)
            .col(UserRoles::RoleId)
            .to_owned(),
    ];

    TableDef { create, indexes }
}

/// Default `AspNetUserLogins` mapping: composite provider key. Key parts
/// are capped at 128 chars so the composite stays indexable everywhere.
#[must_use]
pub fn user_logins() -> TableDef {
    let create = Table::create()
        .table(UserLogins::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(UserLogins::LoginProvider)
                .string_len(128)
                .not_null(),
        )
        .col(
            ColumnDef::new(UserLogins::ProviderKey)
                .string_len(128)
                .not_null(),
        )
        .col(ColumnDef::new(UserLogins::ProviderDisplayName).text())
        .col(ColumnDef::new(UserLogins::UserId).uuid().not_null())
        .primary_key(
            Index::create()
                .col(UserLogins::LoginProvider)
                .col(UserLogins::ProviderKey),
        )
        .foreign_key(
            ForeignKey::create()
                .name("FK_AspNetUserLogins_AspNetUsers_UserId")
                .from(UserLogins::Table, UserLogins::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();

    let indexes = vec![
        Index::create()
            .name("IX_AspNetUserLogins_UserId")
            .table(UserLogins::Table)
            .col(UserLogins::UserId)
            .to_owned(),
    ];

    TableDef { create, indexes }
}

/// Default `AspNetUserTokens` mapping: composite `(UserId, LoginProvider,
/// Name)` key, required owning user.
#[must_use]
pub fn user_tokens() -> TableDef {
    let create = Table::create()
        .table(UserTokens::Table)
        .if_not_exists()
        .col(ColumnDef::new(UserTokens::UserId).uuid().not_null())
        .col(
            ColumnDef::new(UserTokens::LoginProvider)
                .string_len(128)
                .not_null(),
        )
        .col(ColumnDef::new(UserTokens::Name).string_len(128).not_null())
        .col(ColumnDef::new(UserTokens::Value).text())
        .primary_key(
            Index::create()
                .col(UserTokens::UserId)
                .col(UserTokens::LoginProvider)
                .col(UserTokens::Name),
        )
        .foreign_key(
            ForeignKey::create()
                .name("FK_AspNetUserTokens_AspNetUsers_UserId")
                .from(UserTokens::Table, UserTokens::UserId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned();

    TableDef {
        create,
        indexes: vec![],
    }
}
