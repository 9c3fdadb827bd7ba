use super::*;
use chrono::{Duration, Utc};

/// Tests finding pending reservations older than a cutoff.
///
/// Expected: Ok with only the stale pending reservation
#[tokio::test]
async fn finds_stale_pending_reservations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;

    let stale = ReservationFactory::new(db, car.id, user.id)
        .created_at(Utc::now() - Duration::hours(30))
        .build()
        .await?;
    ReservationFactory::new(db, car.id, user.id)
        .created_at(Utc::now() - Duration::hours(30))
        .status("CONFIRMED")
        .build()
        .await?;
    factory::create_reservation(db, car.id, user.id).await?;

    let repo = ReservationRepository::new(db);
    let found = repo
        .find_pending_created_before(Utc::now() - Duration::hours(24))
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stale.id);

    Ok(())
}

/// Tests finding confirmed reservations covering a date and those already ended.
///
/// Expected: Ok with the running rental for `covering` and the finished one for `ended`
#[tokio::test]
async fn finds_running_and_finished_rentals() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;

    let running = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(-1), days_from_today(1))
        .status("CONFIRMED")
        .build()
        .await?;
    let finished = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(-5), days_from_today(-2))
        .status("CONFIRMED")
        .build()
        .await?;
    ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(-1), days_from_today(1))
        .build()
        .await?;

    let repo = ReservationRepository::new(db);
    let today = days_from_today(0);
    let covering = repo.find_confirmed_covering(today).await?;
    let ended = repo.find_confirmed_ended_before(today).await?;

    assert_eq!(covering.iter().map(|r| r.id).collect::<Vec<_>>(), vec![running.id]);
    assert_eq!(ended.iter().map(|r| r.id).collect::<Vec<_>>(), vec![finished.id]);

    Ok(())
}
