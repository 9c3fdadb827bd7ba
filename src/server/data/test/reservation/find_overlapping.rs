use super::*;

/// Tests overlap detection against existing reservations of one car.
///
/// Verifies that touching ranges count as overlapping, that inactive reservations and
/// reservations of other cars are ignored.
///
/// Expected: Ok with only the active overlapping reservations of the car
#[tokio::test]
async fn finds_active_overlapping_reservations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;
    let other_car = factory::create_car(db).await?;

    let touching = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(1), days_from_today(5))
        .status("CONFIRMED")
        .build()
        .await?;
    let inside = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(7), days_from_today(8))
        .build()
        .await?;
    ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(6), days_from_today(9))
        .status("CANCELLED")
        .build()
        .await?;
    ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(11), days_from_today(12))
        .build()
        .await?;
    ReservationFactory::new(db, other_car.id, user.id)
        .dates(days_from_today(5), days_from_today(10))
        .build()
        .await?;

    let range = DateRange::new(days_from_today(5), days_from_today(10)).unwrap();
    let repo = ReservationRepository::new(db);
    let overlapping = repo.find_overlapping(car.id, &range).await?;

    let ids: Vec<i32> = overlapping.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![touching.id, inside.id]);

    Ok(())
}

/// Tests checking whether a car has any active reservation.
///
/// Expected: Ok(false) with only a completed reservation, Ok(true) once a pending one exists
#[tokio::test]
async fn detects_active_reservations_for_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;

    let repo = ReservationRepository::new(db);

    ReservationFactory::new(db, car.id, user.id)
        .status("COMPLETED")
        .build()
        .await?;
    assert!(!repo.has_active_for_car(car.id).await?);

    factory::create_reservation(db, car.id, user.id).await?;
    assert!(repo.has_active_for_car(car.id).await?);

    Ok(())
}
