use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .uuid()
                            .primary_key()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::Name).string().not_null())
                    .col(ColumnDef::new(Locations::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Locations::ParentId).uuid().null())
                    .col(ColumnDef::new(Locations::Address).string().null())
                    .col(ColumnDef::new(Locations::ContactInfo).string().null())
                    .col(ColumnDef::new(Locations::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_parent")
                            .from(Locations::Table, Locations::ParentId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
    Name,
    Kind,
    ParentId,
    Address,
    ContactInfo,
    CreatedAt,
}
