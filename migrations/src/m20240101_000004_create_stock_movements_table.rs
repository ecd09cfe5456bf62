use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only ledger; rows are never updated or deleted.
        manager
            .create_table(
                Table::create()
                    .table(StockMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StockMovements::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovements::ItemId).uuid().not_null())
                    .col(
                        ColumnDef::new(StockMovements::MovementType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StockMovements::Quantity).integer().not_null())
                    .col(
                        ColumnDef::new(StockMovements::FromLocationId)
                            .uuid()
                            .null(),
                    )
                    .col(ColumnDef::new(StockMovements::ToLocationId).uuid().null())
                    .col(ColumnDef::new(StockMovements::Note).text().null())
                    .col(ColumnDef::new(StockMovements::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(StockMovements::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_item")
                            .from(StockMovements::Table, StockMovements::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_from_location")
                            .from(StockMovements::Table, StockMovements::FromLocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_movements_to_location")
                            .from(StockMovements::Table, StockMovements::ToLocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StockMovements::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StockMovements {
    Table,
    Id,
    ItemId,
    MovementType,
    Quantity,
    FromLocationId,
    ToLocationId,
    Note,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
}
