use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create records table
        manager
            .create_table(
                Table::create()
                    .table(Records::Table)
                    .if_not_exists()
                    .col(pk_auto(Records::Id))
                    .col(string(Records::StudentCode))
                    .col(string(Records::Name))
                    .col(string_len(Records::Mobile, 10))
                    .col(string_len(Records::PlaceOfLiving, 8))
                    .col(text_null(Records::HomeAddress))
                    .col(string_null(Records::PgAddress))
                    .col(string_null(Records::PgName))
                    .col(string_null(Records::PgLandmark))
                    .col(string_len_null(Records::PgOwnerMobile, 10))
                    .col(string_null(Records::PgOwnerName))
                    .col(
                        timestamp_with_time_zone(Records::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Records::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per student code
        manager
            .create_index(
                Index::create()
                    .name("idx_records_student_code")
                    .table(Records::Table)
                    .col(Records::StudentCode)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_records_student_code")
                    .table(Records::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Records::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Records {
    Table,
    Id,
    StudentCode,
    Name,
    Mobile,
    PlaceOfLiving,
    HomeAddress,
    PgAddress,
    PgName,
    PgLandmark,
    PgOwnerMobile,
    PgOwnerName,
    CreatedAt,
    UpdatedAt,
}
