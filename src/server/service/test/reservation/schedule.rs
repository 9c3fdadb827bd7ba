use super::*;
use chrono::{Duration, Utc};

/// Tests expiring unpaid reservations past the hold window.
///
/// Expected: only the stale PENDING reservation is cancelled; a zero hold does nothing
#[tokio::test]
async fn expires_stale_pending_reservations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = factory::create_car(db).await?;
    let stale = ReservationFactory::new(db, car.id, user.id)
        .created_at(Utc::now() - Duration::hours(3))
        .build()
        .await?;
    let fresh = factory::create_reservation(db, car.id, user.id).await?;

    let service = ReservationService::new(db);

    assert_eq!(service.expire_pending(Utc::now(), Duration::zero()).await?, 0);
    assert_eq!(
        service.expire_pending(Utc::now(), Duration::hours(1)).await?,
        1
    );

    let stale = service.get_visible(stale.id, &user).await?;
    let fresh = service.get_visible(fresh.id, &user).await?;
    assert_eq!(stale.status, ReservationStatus::Cancelled);
    assert_eq!(fresh.status, ReservationStatus::Pending);

    Ok(())
}

/// Tests marking cars RENTED when a confirmed rental starts.
///
/// Expected: the car covered today becomes RENTED, the future one stays AVAILABLE
#[tokio::test]
async fn marks_started_rentals() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let running_car = factory::create_car(db).await?;
    let future_car = factory::create_car(db).await?;
    ReservationFactory::new(db, running_car.id, user.id)
        .dates(days_from_today(0), days_from_today(2))
        .status("CONFIRMED")
        .build()
        .await?;
    ReservationFactory::new(db, future_car.id, user.id)
        .dates(days_from_today(5), days_from_today(6))
        .status("CONFIRMED")
        .build()
        .await?;

    let started = ReservationService::new(db)
        .mark_rentals_started(days_from_today(0))
        .await?;

    assert_eq!(started, 1);
    let repo = CarRepository::new(db);
    assert_eq!(
        repo.find_by_id(running_car.id).await?.unwrap().status,
        CarStatus::Rented
    );
    assert_eq!(
        repo.find_by_id(future_car.id).await?.unwrap().status,
        CarStatus::Available
    );

    Ok(())
}

/// Tests completing rentals whose period has ended.
///
/// Verifies that a car is kept RENTED when another confirmed rental of it covers today.
///
/// Expected: both finished reservations COMPLETED; only the car without a follow-up rental released
#[tokio::test]
async fn completes_finished_rentals() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let returned_car = factory::car::CarFactory::new(db)
        .status("RENTED")
        .build()
        .await?;
    let rebooked_car = factory::car::CarFactory::new(db)
        .status("RENTED")
        .build()
        .await?;
    let finished = ReservationFactory::new(db, returned_car.id, user.id)
        .dates(days_from_today(-4), days_from_today(-1))
        .status("CONFIRMED")
        .build()
        .await?;
    ReservationFactory::new(db, rebooked_car.id, user.id)
        .dates(days_from_today(-4), days_from_today(-1))
        .status("CONFIRMED")
        .build()
        .await?;
    ReservationFactory::new(db, rebooked_car.id, user.id)
        .dates(days_from_today(0), days_from_today(3))
        .status("CONFIRMED")
        .build()
        .await?;

    let service = ReservationService::new(db);
    let completed = service.complete_finished(days_from_today(0)).await?;

    assert_eq!(completed, 2);
    assert_eq!(
        service.get_visible(finished.id, &user).await?.status,
        ReservationStatus::Completed
    );

    let repo = CarRepository::new(db);
    assert_eq!(
        repo.find_by_id(returned_car.id).await?.unwrap().status,
        CarStatus::Available
    );
    assert_eq!(
        repo.find_by_id(rebooked_car.id).await?.unwrap().status,
        CarStatus::Rented
    );

    Ok(())
}
