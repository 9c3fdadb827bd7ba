use super::*;
use test_utils::factory::{
    car::CarFactory, helpers::days_from_today, reservation::ReservationFactory,
};

fn search() -> CarSearchParams {
    CarSearchParams {
        page: 0,
        per_page: 50,
        ..Default::default()
    }
}

/// Tests combining type, agency and price filters.
///
/// Expected: Ok with only the car matching every filter
#[tokio::test]
async fn applies_filters_conjunctively() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Reservation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let wanted = CarFactory::new(db)
        .car_type("SUV")
        .agency("Tinghir")
        .price_per_day_cents(40_000)
        .build()
        .await?;
    CarFactory::new(db)
        .car_type("SUV")
        .agency("Tinghir")
        .price_per_day_cents(90_000)
        .build()
        .await?;
    CarFactory::new(db)
        .car_type("Compact")
        .agency("Tinghir")
        .price_per_day_cents(40_000)
        .build()
        .await?;
    CarFactory::new(db)
        .car_type("SUV")
        .agency("Rabat")
        .price_per_day_cents(40_000)
        .build()
        .await?;

    let repo = CarRepository::new(db);
    let (cars, total) = repo
        .search(&CarSearchParams {
            car_type: Some("SUV".to_string()),
            agency: Some("Tinghir".to_string()),
            min_price_cents: Some(10_000),
            max_price_cents: Some(50_000),
            ..search()
        })
        .await?;

    assert_eq!(total, 1);
    assert_eq!(cars[0].id, wanted.id);

    Ok(())
}

/// Tests the availability filter.
///
/// Verifies cars with an active overlapping reservation and cars in maintenance are
/// excluded, while cancelled and non-overlapping reservations do not exclude a car.
///
/// Expected: Ok with the free car and the car whose booking was cancelled
#[tokio::test]
async fn excludes_booked_and_maintenance_cars() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Reservation)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let free = factory::create_car(db).await?;
    let booked = factory::create_car(db).await?;
    let cancelled = factory::create_car(db).await?;
    let later = factory::create_car(db).await?;
    CarFactory::new(db).status("MAINTENANCE").build().await?;

    ReservationFactory::new(db, booked.id, user.id)
        .dates(days_from_today(9), days_from_today(12))
        .status("CONFIRMED")
        .build()
        .await?;
    ReservationFactory::new(db, cancelled.id, user.id)
        .dates(days_from_today(10), days_from_today(11))
        .status("CANCELLED")
        .build()
        .await?;
    ReservationFactory::new(db, later.id, user.id)
        .dates(days_from_today(20), days_from_today(21))
        .build()
        .await?;

    let range = DateRange::new(days_from_today(5), days_from_today(10)).unwrap();
    let repo = CarRepository::new(db);
    let (cars, total) = repo
        .search(&CarSearchParams {
            available_for: Some(range),
            ..search()
        })
        .await?;

    let mut ids: Vec<i32> = cars.iter().map(|c| c.id).collect();
    ids.sort();
    let mut expected = vec![free.id, cancelled.id, later.id];
    expected.sort();

    assert_eq!(total, 3);
    assert_eq!(ids, expected);

    Ok(())
}
