//! Car catalog service.
//!
//! Listing, search and availability lookups are open to everyone; create, update and
//! delete are admin operations guarded by the controller.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{car::CarRepository, reservation::ReservationRepository},
    error::{is_unique_violation, AppError},
    model::{
        availability::{check_availability, Availability, DateRange},
        car::{Car, CarParams, CarSearchParams, PaginatedCars},
        reservation::Reservation,
    },
    util::pagination::total_pages,
};

const DUPLICATE_REGISTRATION: &str = "A car with this registration number already exists";

pub struct CarService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CarService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a car to the catalog.
    ///
    /// # Returns
    /// - `Ok(Car)` - The created car
    /// - `Err(AppError::Conflict)` - Registration number already in use
    pub async fn create(&self, params: CarParams) -> Result<Car, AppError> {
        let car = CarRepository::new(self.db)
            .create(params)
            .await
            .map_err(duplicate_registration)?;

        tracing::info!(car_id = car.id, registration = %car.registration_number, "Car created");

        Ok(car)
    }

    /// Gets a car by id, 404 when missing.
    pub async fn get(&self, id: i32) -> Result<Car, AppError> {
        CarRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(car_not_found)
    }

    pub async fn list(
        &self,
        agency: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCars, AppError> {
        let (cars, total) = CarRepository::new(self.db)
            .get_paginated(agency, page, per_page)
            .await?;

        Ok(PaginatedCars {
            cars,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    pub async fn by_agency(&self, agency: &str) -> Result<Vec<Car>, AppError> {
        CarRepository::new(self.db).get_by_agency(agency).await
    }

    /// Searches the catalog with conjunctive filters.
    pub async fn search(&self, params: CarSearchParams) -> Result<PaginatedCars, AppError> {
        let (cars, total) = CarRepository::new(self.db).search(&params).await?;

        Ok(PaginatedCars {
            cars,
            total,
            page: params.page,
            per_page: params.per_page,
            total_pages: total_pages(total, params.per_page),
        })
    }

    /// Decides whether a car could be booked for `range` right now.
    ///
    /// This is advisory only; the booking transaction re-checks under the car row claim.
    pub async fn availability(&self, id: i32, range: DateRange) -> Result<Availability, AppError> {
        let car = self.get(id).await?;
        let overlapping = ReservationRepository::new(self.db)
            .find_overlapping(car.id, &range)
            .await?;
        let booked: Vec<_> = overlapping.iter().map(Reservation::booked_range).collect();

        Ok(check_availability(car.status, &range, &booked))
    }

    pub async fn types(&self) -> Result<Vec<String>, AppError> {
        CarRepository::new(self.db).distinct_types().await
    }

    pub async fn agencies(&self) -> Result<Vec<String>, AppError> {
        CarRepository::new(self.db).distinct_agencies().await
    }

    /// Replaces a car's fields.
    ///
    /// # Returns
    /// - `Ok(Car)` - The updated car
    /// - `Err(AppError::NotFound)` - No car with that id
    /// - `Err(AppError::Conflict)` - Registration number taken by another car
    pub async fn update(&self, id: i32, params: CarParams) -> Result<Car, AppError> {
        let car = CarRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(duplicate_registration)?
            .ok_or_else(car_not_found)?;

        tracing::info!(car_id = car.id, status = %car.status, "Car updated");

        Ok(car)
    }

    /// Removes a car that has no active reservations.
    ///
    /// The car row is claimed before the check, so a booking for the same car either
    /// committed before the check sees it or waits until the delete has finished.
    ///
    /// # Returns
    /// - `Ok(())` - Car deleted
    /// - `Err(AppError::Conflict)` - Car still has PENDING or CONFIRMED reservations
    /// - `Err(AppError::NotFound)` - No car with that id
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        let car_repo = CarRepository::new(&txn);
        if !car_repo.claim(id).await? {
            return Err(car_not_found());
        }

        if ReservationRepository::new(&txn)
            .has_active_for_car(id)
            .await?
        {
            return Err(AppError::Conflict(
                "Car has active reservations and cannot be deleted".to_string(),
            ));
        }

        car_repo.delete(id).await?;
        txn.commit().await?;

        tracing::info!(car_id = id, "Car deleted");

        Ok(())
    }
}

fn car_not_found() -> AppError {
    AppError::NotFound("Car not found".to_string())
}

fn duplicate_registration(err: AppError) -> AppError {
    match err {
        AppError::DbErr(ref db_err) if is_unique_violation(db_err) => {
            AppError::Conflict(DUPLICATE_REGISTRATION.to_string())
        }
        other => other,
    }
}
