use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Books); 4] = [
    ("idx_books_title", Books::Title),
    ("idx_books_author", Books::Author),
    ("idx_books_edition_date", Books::EditionDate),
    ("idx_books_publisher_id", Books::PublisherId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // isbn is already covered by its unique constraint.
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Books::Table)
                        .col(col)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        manager
            .create_index(
                Index::create()
                    .table(UserPublishers::Table)
                    .col(UserPublishers::PublisherId)
                    .name("idx_user_publishers_publisher_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_publishers_publisher_id")
                    .to_owned(),
            )
            .await?;
        for (name, _) in INDEXES {
            manager.drop_index(Index::drop().name(name).to_owned()).await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum Books {
    Table,
    Title,
    Author,
    EditionDate,
    PublisherId,
}

#[derive(Iden)]
enum UserPublishers {
    Table,
    PublisherId,
}
