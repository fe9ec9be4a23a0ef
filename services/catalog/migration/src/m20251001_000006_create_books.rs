use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Books::Isbn)
                            .string_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Books::Ean).string_len(16).null())
                    .col(ColumnDef::new(Books::PublisherId).integer().not_null())
                    .col(ColumnDef::new(Books::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Books::Subtitle).string_len(100).null())
                    .col(ColumnDef::new(Books::Author).string_len(100).not_null())
                    .col(ColumnDef::new(Books::PrologueAuthor).string_len(40).null())
                    .col(ColumnDef::new(Books::Translator).string_len(40).null())
                    .col(ColumnDef::new(Books::Illustrator).string_len(60).null())
                    .col(ColumnDef::new(Books::BindingTypeId).integer().not_null())
                    .col(
                        ColumnDef::new(Books::PageCount)
                            .integer()
                            .not_null()
                            .check(Expr::col(Books::PageCount).gte(1)),
                    )
                    .col(ColumnDef::new(Books::HeightCm).decimal_len(5, 2).null())
                    .col(ColumnDef::new(Books::WidthCm).decimal_len(5, 2).null())
                    .col(ColumnDef::new(Books::ThicknessCm).decimal_len(5, 2).null())
                    .col(ColumnDef::new(Books::WeightG).integer().null())
                    .col(
                        ColumnDef::new(Books::OriginalLanguageId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Books::EditionNumber)
                            .integer()
                            .not_null()
                            .default(1)
                            .check(Expr::col(Books::EditionNumber).gte(1)),
                    )
                    .col(ColumnDef::new(Books::EditionDate).date().null())
                    .col(ColumnDef::new(Books::CountryId).integer().not_null())
                    .col(ColumnDef::new(Books::PrintNumber).integer().null())
                    .col(ColumnDef::new(Books::Topic).string_len(60).null())
                    .col(ColumnDef::new(Books::Price).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Books::CurrencyId).integer().not_null())
                    .col(
                        ColumnDef::new(Books::DistributorDiscount)
                            .decimal_len(4, 1)
                            .not_null()
                            .check(
                                Expr::col(Books::DistributorDiscount)
                                    .gte(0)
                                    .and(Expr::col(Books::DistributorDiscount).lte(99.9)),
                            ),
                    )
                    .col(ColumnDef::new(Books::Summary).text().not_null())
                    .col(ColumnDef::new(Books::ImageCode).string_len(120).null())
                    .col(ColumnDef::new(Books::AgeRange).string_len(30).null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Books::Table, Books::PublisherId)
                            .to(Publishers::Table, Publishers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Books::Table, Books::BindingTypeId)
                            .to(BindingTypes::Table, BindingTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Books::Table, Books::OriginalLanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Books::Table, Books::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Books::Table, Books::CurrencyId)
                            .to(Currencies::Table, Currencies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Isbn,
    Ean,
    PublisherId,
    Title,
    Subtitle,
    Author,
    PrologueAuthor,
    Translator,
    Illustrator,
    BindingTypeId,
    PageCount,
    HeightCm,
    WidthCm,
    ThicknessCm,
    WeightG,
    OriginalLanguageId,
    EditionNumber,
    EditionDate,
    CountryId,
    PrintNumber,
    Topic,
    Price,
    CurrencyId,
    DistributorDiscount,
    Summary,
    ImageCode,
    AgeRange,
}

#[derive(Iden)]
enum Publishers {
    Table,
    Id,
}

#[derive(Iden)]
enum BindingTypes {
    Table,
    Id,
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
}

#[derive(Iden)]
enum Countries {
    Table,
    Id,
}

#[derive(Iden)]
enum Currencies {
    Table,
    Id,
}
