use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserClaims::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserClaims::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserClaims::ClaimType).string_len(256).not_null())
                    .col(ColumnDef::new(UserClaims::ClaimValue).string_len(256).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserClaims::Table, UserClaims::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(UserClaims::Table)
                    .col(UserClaims::UserId)
                    .name("idx_user_claims_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserClaims::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserClaims {
    Table,
    Id,
    UserId,
    ClaimType,
    ClaimValue,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
