//! Car data repository.
//!
//! Provides catalog queries, admin CRUD, and the row claim that serializes concurrent
//! bookings of the same car.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Query},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        availability::{CarStatus, DateRange, ReservationStatus},
        car::{Car, CarParams, CarSearchParams},
    },
};

pub struct CarRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CarRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new car.
    ///
    /// # Returns
    /// - `Ok(Car)` - The created car
    /// - `Err(AppError::DbErr)` - Insert failed, including unique registration violations
    pub async fn create(&self, params: CarParams) -> Result<Car, AppError> {
        let now = Utc::now();
        let entity = entity::car::ActiveModel {
            brand: ActiveValue::Set(params.brand),
            model: ActiveValue::Set(params.model),
            year: ActiveValue::Set(params.year),
            registration_number: ActiveValue::Set(params.registration_number),
            car_type: ActiveValue::Set(params.car_type),
            agency: ActiveValue::Set(params.agency),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            price_per_day_cents: ActiveValue::Set(params.price_per_day_cents),
            image_url: ActiveValue::Set(params.image_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Car::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Car>, AppError> {
        entity::prelude::Car::find_by_id(id)
            .one(self.db)
            .await?
            .map(Car::from_entity)
            .transpose()
    }

    /// Gets a page of cars ordered by id, optionally restricted to one agency.
    ///
    /// # Returns
    /// - `Ok((cars, total))` - Cars on the requested zero-indexed page and total matches
    pub async fn get_paginated(
        &self,
        agency: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Car>, u64), AppError> {
        let mut query = entity::prelude::Car::find();
        if let Some(agency) = agency {
            query = query.filter(entity::car::Column::Agency.eq(agency));
        }

        let paginator = query
            .order_by_asc(entity::car::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let cars = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Car::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((cars, total))
    }

    pub async fn get_by_agency(&self, agency: &str) -> Result<Vec<Car>, AppError> {
        entity::prelude::Car::find()
            .filter(entity::car::Column::Agency.eq(agency))
            .order_by_asc(entity::car::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Car::from_entity)
            .collect()
    }

    /// Searches the catalog with conjunctive filters.
    ///
    /// When `available_for` is set, cars in maintenance and cars with an active
    /// reservation overlapping the range are excluded through a subquery.
    pub async fn search(&self, params: &CarSearchParams) -> Result<(Vec<Car>, u64), AppError> {
        let mut query = entity::prelude::Car::find();

        if let Some(car_type) = &params.car_type {
            query = query.filter(entity::car::Column::CarType.eq(car_type.as_str()));
        }
        if let Some(agency) = &params.agency {
            query = query.filter(entity::car::Column::Agency.eq(agency.as_str()));
        }
        if let Some(min) = params.min_price_cents {
            query = query.filter(entity::car::Column::PricePerDayCents.gte(min));
        }
        if let Some(max) = params.max_price_cents {
            query = query.filter(entity::car::Column::PricePerDayCents.lte(max));
        }
        if let Some(status) = params.status {
            query = query.filter(entity::car::Column::Status.eq(status.as_str()));
        }
        if let Some(range) = &params.available_for {
            query = query
                .filter(entity::car::Column::Status.ne(CarStatus::Maintenance.as_str()))
                .filter(
                    entity::car::Column::Id.not_in_subquery(
                        Query::select()
                            .column(entity::reservation::Column::CarId)
                            .from(entity::prelude::Reservation)
                            .cond_where(active_overlap_condition(range))
                            .to_owned(),
                    ),
                );
        }

        let paginator = query
            .order_by_asc(entity::car::Column::PricePerDayCents)
            .order_by_asc(entity::car::Column::Id)
            .paginate(self.db, params.per_page);

        let total = paginator.num_items().await?;
        let cars = paginator
            .fetch_page(params.page)
            .await?
            .into_iter()
            .map(Car::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((cars, total))
    }

    /// Distinct car types, sorted.
    pub async fn distinct_types(&self) -> Result<Vec<String>, AppError> {
        Ok(entity::prelude::Car::find()
            .select_only()
            .column(entity::car::Column::CarType)
            .distinct()
            .order_by_asc(entity::car::Column::CarType)
            .into_tuple::<String>()
            .all(self.db)
            .await?)
    }

    /// Distinct agencies, sorted.
    pub async fn distinct_agencies(&self) -> Result<Vec<String>, AppError> {
        Ok(entity::prelude::Car::find()
            .select_only()
            .column(entity::car::Column::Agency)
            .distinct()
            .order_by_asc(entity::car::Column::Agency)
            .into_tuple::<String>()
            .all(self.db)
            .await?)
    }

    /// Replaces every editable field of a car.
    ///
    /// # Returns
    /// - `Ok(Some(Car))` - Updated car
    /// - `Ok(None)` - No car with that id
    pub async fn update(&self, id: i32, params: CarParams) -> Result<Option<Car>, AppError> {
        let Some(existing) = entity::prelude::Car::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::car::ActiveModel = existing.into();
        active.brand = ActiveValue::Set(params.brand);
        active.model = ActiveValue::Set(params.model);
        active.year = ActiveValue::Set(params.year);
        active.registration_number = ActiveValue::Set(params.registration_number);
        active.car_type = ActiveValue::Set(params.car_type);
        active.agency = ActiveValue::Set(params.agency);
        active.status = ActiveValue::Set(params.status.as_str().to_string());
        active.price_per_day_cents = ActiveValue::Set(params.price_per_day_cents);
        active.image_url = ActiveValue::Set(params.image_url);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Car::from_entity(entity).map(Some)
    }

    /// Sets the operational status of a car.
    ///
    /// # Returns
    /// - `Ok(true)` - Status written
    /// - `Ok(false)` - No car with that id
    pub async fn set_status(&self, id: i32, status: CarStatus) -> Result<bool, AppError> {
        let result = entity::prelude::Car::update_many()
            .col_expr(entity::car::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::car::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::car::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Claims the car row for the current transaction.
    ///
    /// Writes `updated_at` so the database takes a row (Postgres) or write (SQLite) lock
    /// that is held until the transaction ends. A second booking transaction for the same
    /// car blocks here and then observes the first one's reservation.
    ///
    /// # Returns
    /// - `Ok(true)` - Car exists and is now locked
    /// - `Ok(false)` - No car with that id
    pub async fn claim(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Car::update_many()
            .col_expr(entity::car::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::car::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a car. Its reservations and payments cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - Car deleted
    /// - `Ok(false)` - No car with that id
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Car::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

/// `status IN (active) AND start_date <= range.end AND end_date >= range.start`
pub(crate) fn active_overlap_condition(range: &DateRange) -> sea_orm::Condition {
    sea_orm::Condition::all()
        .add(
            entity::reservation::Column::Status
                .is_in(ReservationStatus::active().map(|s| s.as_str())),
        )
        .add(entity::reservation::Column::StartDate.lte(range.end()))
        .add(entity::reservation::Column::EndDate.gte(range.start()))
}
