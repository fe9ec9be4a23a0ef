use sea_orm_migration::prelude::*;

mod m20251001_000001_create_users;
mod m20251001_000002_create_profiles;
mod m20251001_000003_create_publishers;
mod m20251001_000004_create_user_publishers;
mod m20251001_000005_create_lookup_tables;
mod m20251001_000006_create_books;
mod m20251001_000007_add_book_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_users::Migration),
            Box::new(m20251001_000002_create_profiles::Migration),
            Box::new(m20251001_000003_create_publishers::Migration),
            Box::new(m20251001_000004_create_user_publishers::Migration),
            Box::new(m20251001_000005_create_lookup_tables::Migration),
            Box::new(m20251001_000006_create_books::Migration),
            Box::new(m20251001_000007_add_book_indexes::Migration),
        ]
    }
}
