use super::*;
use chrono::{Duration, Utc};

/// Tests listing a user's reservations filtered by status, newest first.
///
/// Expected: Ok with the user's matching reservations ordered by creation time descending
#[tokio::test]
async fn lists_user_reservations_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let someone_else = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;

    let older = ReservationFactory::new(db, car.id, user.id)
        .created_at(Utc::now() - Duration::days(2))
        .status("CONFIRMED")
        .build()
        .await?;
    let newer = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(20), days_from_today(21))
        .build()
        .await?;
    let past = ReservationFactory::new(db, car.id, user.id)
        .status("COMPLETED")
        .build()
        .await?;
    factory::create_reservation(db, car.id, someone_else.id).await?;

    let repo = ReservationRepository::new(db);
    let active = repo
        .get_by_user(user.id, &ReservationStatus::active())
        .await?;
    let all = repo.get_by_user(user.id, ReservationStatus::ALL).await?;

    let active_ids: Vec<i32> = active.iter().map(|r| r.id).collect();
    assert_eq!(active_ids, vec![newer.id, older.id]);
    assert_eq!(all.len(), 3);
    assert!(all.iter().any(|r| r.id == past.id));

    Ok(())
}

/// Tests the admin listing with a status filter.
///
/// Expected: Ok with only reservations in the requested status and the matching total
#[tokio::test]
async fn paginates_with_status_filter() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;

    for _ in 0..3 {
        ReservationFactory::new(db, car.id, user.id)
            .status("CANCELLED")
            .build()
            .await?;
    }
    factory::create_reservation(db, car.id, user.id).await?;

    let repo = ReservationRepository::new(db);
    let (page, total) = repo
        .get_paginated(Some(ReservationStatus::Cancelled), 0, 2)
        .await?;
    let (_, everything) = repo.get_paginated(None, 0, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|r| r.status == ReservationStatus::Cancelled));
    assert_eq!(everything, 4);

    Ok(())
}
