use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).uuid().primary_key().not_null())
                    .col(
                        ColumnDef::new(Comments::EntityType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Comments::EntityId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Text).text().not_null())
                    .col(ColumnDef::new(Comments::AuthorName).string().not_null())
                    .col(ColumnDef::new(Comments::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(Comments::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_entity")
                    .table(Comments::Table)
                    .col(Comments::EntityType)
                    .col(Comments::EntityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Comments {
    Table,
    Id,
    EntityType,
    EntityId,
    Text,
    AuthorName,
    CreatedBy,
    CreatedAt,
}
