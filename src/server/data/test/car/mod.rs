use crate::server::{
    data::car::CarRepository,
    error::AppError,
    model::{
        availability::{CarStatus, DateRange},
        car::{CarParams, CarSearchParams},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod claim;
mod create;
mod search;
mod update;

fn params(registration_number: &str) -> CarParams {
    CarParams {
        brand: "Peugeot".to_string(),
        model: "208".to_string(),
        year: 2024,
        registration_number: registration_number.to_string(),
        car_type: "Compact".to_string(),
        agency: "Ouarzazate".to_string(),
        status: CarStatus::Available,
        price_per_day_cents: 28_000,
        image_url: None,
    }
}
