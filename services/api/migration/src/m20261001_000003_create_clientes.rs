use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clientes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clientes::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Clientes::Document).string_len(14).not_null())
                    .col(ColumnDef::new(Clientes::Phone).string_len(11).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clientes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Clientes {
    #[iden = "Clientes"]
    Table,
    Id,
    Name,
    Document,
    Phone,
}
