//! Create `person` table.
//!
//! No unique constraint on `name`: duplicates are allowed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(uuid(Person::Id).primary_key())
                    .col(text(Person::Name).not_null())
                    .col(text(Person::Number).not_null())
                    .col(timestamp_with_time_zone(Person::Date).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_person_date")
                    .table(Person::Table)
                    .col(Person::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Person { Table, Id, Name, Number, Date }
