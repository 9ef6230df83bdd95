use sea_orm_migration::prelude::*;

use crate::schema::IdentitySchema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for def in IdentitySchema::default().table_defs() {
            manager.create_table(def.create).await?;
            for index in def.indexes {
                manager.create_index(index).await?;
            }
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // children first, owners last
        for def in IdentitySchema::default().table_defs().into_iter().rev() {
            if let Some(stmt) = def.drop_stmt() {
                manager.drop_table(stmt).await?;
            }
        }
        Ok(())
    }
}
