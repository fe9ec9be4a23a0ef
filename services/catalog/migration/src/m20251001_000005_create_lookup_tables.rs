use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `{id, code UNIQUE, name}`, the shape every lookup table shares.
fn lookup_table<T>(table: T, id: T, code: T, code_len: u32, name: T) -> TableCreateStatement
where
    T: Iden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(code)
                .string_len(code_len)
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(name).string_len(100).not_null())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(lookup_table(
                Countries::Table,
                Countries::Id,
                Countries::Code,
                2,
                Countries::Name,
            ))
            .await?;

        let mut currencies = lookup_table(
            Currencies::Table,
            Currencies::Id,
            Currencies::Code,
            3,
            Currencies::Name,
        );
        currencies.col(ColumnDef::new(Currencies::Symbol).string_len(5).null());
        manager.create_table(currencies).await?;

        manager
            .create_table(lookup_table(
                Languages::Table,
                Languages::Id,
                Languages::Code,
                2,
                Languages::Name,
            ))
            .await?;
        manager
            .create_table(lookup_table(
                BindingTypes::Table,
                BindingTypes::Id,
                BindingTypes::Code,
                20,
                BindingTypes::Name,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BindingTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Countries {
    Table,
    Id,
    Code,
    Name,
}

#[derive(Iden)]
enum Currencies {
    Table,
    Id,
    Code,
    Name,
    Symbol,
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
    Code,
    Name,
}

#[derive(Iden)]
enum BindingTypes {
    Table,
    Id,
    Code,
    Name,
}
