use super::*;

/// Tests booking a free car as a registered user.
///
/// Verifies the quoted total, the initial statuses and the outbox entry.
///
/// Expected: Ok with PENDING/PENDING, total = 3 days x daily price, one confirmation queued
#[tokio::test]
async fn books_free_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = car_priced(db, 40_000).await?;

    let reservation = ReservationService::new(db)
        .create(booking(car.id, Booker::User(user.id), 2, 4))
        .await?;

    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.payment_status, PaymentStatus::Pending);
    assert_eq!(reservation.total_price_cents, 120_000);
    assert_eq!(reservation.user_id, user.id);

    let queued = NotificationRepository::new(db)
        .get_by_recipient(&user.email)
        .await?;
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].kind, NotificationKind::ReservationConfirmation);
    assert!(queued[0].body.contains("1200.00 MAD"));

    Ok(())
}

/// Tests that an overlapping booking of the same car is rejected.
///
/// Expected: Err(ReservationError::CarUnavailable) and no second confirmation queued
#[tokio::test]
async fn rejects_overlapping_booking() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let first = registered_user(db).await?;
    let second = registered_user(db).await?;
    let car = car_priced(db, 25_000).await?;

    let service = ReservationService::new(db);
    service
        .create(booking(car.id, Booker::User(first.id), 3, 6))
        .await?;
    let result = service
        .create(booking(car.id, Booker::User(second.id), 6, 8))
        .await;

    assert!(matches!(
        result,
        Err(AppError::ReservationErr(ReservationError::CarUnavailable(_)))
    ));
    assert!(NotificationRepository::new(db)
        .get_by_recipient(&second.email)
        .await?
        .is_empty());

    Ok(())
}

/// Tests that adjacent but non-overlapping ranges can both be booked.
///
/// Expected: Ok for both reservations
#[tokio::test]
async fn allows_back_to_back_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = car_priced(db, 25_000).await?;

    let service = ReservationService::new(db);
    service
        .create(booking(car.id, Booker::User(user.id), 3, 6))
        .await?;
    service
        .create(booking(car.id, Booker::User(user.id), 7, 9))
        .await?;

    Ok(())
}

/// Tests booking a car under maintenance.
///
/// Expected: Err(CarUnavailable) with the maintenance message
#[tokio::test]
async fn rejects_car_in_maintenance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = factory::car::CarFactory::new(db)
        .status("MAINTENANCE")
        .build()
        .await?;

    let result = ReservationService::new(db)
        .create(booking(car.id, Booker::User(user.id), 1, 2))
        .await;

    match result {
        Err(AppError::ReservationErr(ReservationError::CarUnavailable(message))) => {
            assert_eq!(message, "Car is not available for reservation");
        }
        other => panic!("expected CarUnavailable, got {:?}", other.map(|r| r.id)),
    }

    Ok(())
}

/// Tests booking a car that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_unknown_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;

    let result = ReservationService::new(db)
        .create(booking(77, Booker::User(user.id), 1, 2))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests anonymous bookings with guest details.
///
/// Verifies that the first booking creates a guest account, the second reuses it, and the
/// confirmation goes to the guest email.
///
/// Expected: Ok for both with the same user id
#[tokio::test]
async fn reuses_guest_account() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let car = car_priced(db, 25_000).await?;

    let service = ReservationService::new(db);
    let first = service
        .create(booking(car.id, Booker::Guest(guest("hajar@example.com")), 1, 1))
        .await?;
    let second = service
        .create(booking(car.id, Booker::Guest(guest("hajar@example.com")), 5, 5))
        .await?;

    assert_eq!(first.user_id, second.user_id);
    assert_eq!(
        first.guest.as_ref().map(|g| g.email.as_str()),
        Some("hajar@example.com")
    );

    let queued = NotificationRepository::new(db)
        .get_by_recipient("hajar@example.com")
        .await?;
    assert_eq!(queued.len(), 2);

    Ok(())
}

/// Tests a guest booking with the email of a registered account.
///
/// Expected: Err(AppError::BadRequest) asking to log in
#[tokio::test]
async fn guest_cannot_use_registered_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = car_priced(db, 25_000).await?;

    let result = ReservationService::new(db)
        .create(booking(car.id, Booker::Guest(guest(&user.email)), 1, 2))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
