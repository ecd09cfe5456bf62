use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).uuid().primary_key().not_null())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Brand).string().not_null())
                    .col(ColumnDef::new(Items::Model).string().not_null())
                    .col(ColumnDef::new(Items::Category).string().not_null())
                    .col(
                        ColumnDef::new(Items::MinStockThreshold)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Items::Tags).json().not_null())
                    .col(ColumnDef::new(Items::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Items::Description).text().not_null())
                    // Materialized view over the movement ledger; only the
                    // movement recorder writes these two columns.
                    .col(
                        ColumnDef::new(Items::CurrentStock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Items::Status)
                            .string_len(20)
                            .not_null()
                            .default("UNAVAILABLE"),
                    )
                    .col(ColumnDef::new(Items::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Items::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_items_category")
                    .table(Items::Table)
                    .col(Items::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    Name,
    Brand,
    Model,
    Category,
    MinStockThreshold,
    Tags,
    ImageUrl,
    Description,
    CurrentStock,
    Status,
    CreatedAt,
    UpdatedAt,
}
