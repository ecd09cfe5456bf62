use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The movement feed is always read newest-first, and ledger
        // reconciliation scans per item in creation order.
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_item_created")
                    .table(StockMovements::Table)
                    .col(StockMovements::ItemId)
                    .col(StockMovements::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_movements_created_at")
                    .table(StockMovements::Table)
                    .col(StockMovements::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_stock_movements_item_created")
                    .table(StockMovements::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_stock_movements_created_at")
                    .table(StockMovements::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum StockMovements {
    Table,
    ItemId,
    CreatedAt,
}
