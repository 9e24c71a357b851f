pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_tables;
mod m20250301_000002_create_blog_tables;
mod m20250302_000001_create_directory_tables;
mod m20250302_000002_create_guide_content_tables;
mod m20250303_000001_add_listing_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_tables::Migration),
            Box::new(m20250301_000002_create_blog_tables::Migration),
            Box::new(m20250302_000001_create_directory_tables::Migration),
            Box::new(m20250302_000002_create_guide_content_tables::Migration),
            Box::new(m20250303_000001_add_listing_indexes::Migration),
        ]
    }
}
