use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPublishers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserPublishers::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserPublishers::PublisherId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserPublishers::UserId)
                            .col(UserPublishers::PublisherId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserPublishers::Table, UserPublishers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(UserPublishers::Table, UserPublishers::PublisherId)
                            .to(Publishers::Table, Publishers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPublishers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserPublishers {
    Table,
    UserId,
    PublisherId,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Publishers {
    Table,
    Id,
}
