use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(pk_auto(Car::Id))
                    .col(string(Car::Brand))
                    .col(string(Car::Model))
                    .col(integer(Car::Year))
                    .col(string_uniq(Car::RegistrationNumber))
                    .col(string(Car::CarType))
                    .col(string(Car::Agency))
                    .col(string(Car::Status).default("AVAILABLE"))
                    .col(big_integer(Car::PricePerDayCents))
                    .col(text_null(Car::ImageUrl))
                    .col(
                        timestamp_with_time_zone(Car::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Car::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_car_agency")
                    .table(Car::Table)
                    .col(Car::Agency)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Car::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Car {
    Table,
    Id,
    Brand,
    Model,
    Year,
    RegistrationNumber,
    CarType,
    Agency,
    Status,
    PricePerDayCents,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
