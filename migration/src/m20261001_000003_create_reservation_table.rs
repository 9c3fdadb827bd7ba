use sea_orm_migration::{prelude::*, schema::*};

use super::{m20261001_000001_create_user_table::User, m20261001_000002_create_car_table::Car};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(integer(Reservation::CarId))
                    .col(integer(Reservation::UserId))
                    .col(date(Reservation::StartDate))
                    .col(date(Reservation::EndDate))
                    .col(big_integer(Reservation::TotalPriceCents))
                    .col(string(Reservation::Status).default("PENDING"))
                    .col(string(Reservation::PaymentStatus).default("PENDING"))
                    .col(string_null(Reservation::GuestFirstName))
                    .col(string_null(Reservation::GuestLastName))
                    .col(string_null(Reservation::GuestEmail))
                    .col(string_null(Reservation::GuestPhone))
                    .col(
                        timestamp_with_time_zone(Reservation::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Reservation::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_car_id")
                            .from(Reservation::Table, Reservation::CarId)
                            .to(Car::Table, Car::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_user_id")
                            .from(Reservation::Table, Reservation::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap lookups filter by car first, then by the date window
        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_car_dates")
                    .table(Reservation::Table)
                    .col(Reservation::CarId)
                    .col(Reservation::StartDate)
                    .col(Reservation::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_user_id")
                    .table(Reservation::Table)
                    .col(Reservation::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reservation {
    Table,
    Id,
    CarId,
    UserId,
    StartDate,
    EndDate,
    TotalPriceCents,
    Status,
    PaymentStatus,
    GuestFirstName,
    GuestLastName,
    GuestEmail,
    GuestPhone,
    CreatedAt,
    UpdatedAt,
}
