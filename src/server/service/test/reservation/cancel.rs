use super::*;

/// Tests an owner cancelling an unpaid reservation.
///
/// Expected: CANCELLED with payment status still PENDING and a cancellation queued
#[tokio::test]
async fn owner_cancels_pending_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = factory::create_car(db).await?;
    let reservation = factory::create_reservation(db, car.id, user.id).await?;

    let cancelled = ReservationService::new(db)
        .cancel(reservation.id, &user)
        .await?;

    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.payment_status, PaymentStatus::Pending);

    let queued = NotificationRepository::new(db)
        .get_by_recipient(&user.email)
        .await?;
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].kind, NotificationKind::ReservationCancellation);

    Ok(())
}

/// Tests cancelling a paid rental that is currently running.
///
/// Expected: payment REFUNDED and the car back to AVAILABLE
#[tokio::test]
async fn refunds_and_releases_running_rental() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = factory::car::CarFactory::new(db)
        .status("RENTED")
        .build()
        .await?;
    let reservation = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(-1), days_from_today(2))
        .status("CONFIRMED")
        .payment_status("PAID")
        .build()
        .await?;

    let cancelled = ReservationService::new(db)
        .cancel(reservation.id, &user)
        .await?;

    assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);

    let car = CarRepository::new(db).find_by_id(car.id).await?.unwrap();
    assert_eq!(car.status, CarStatus::Available);

    Ok(())
}

/// Tests cancelling a reservation that is already completed.
///
/// Expected: Err(ReservationError::InvalidTransition)
#[tokio::test]
async fn cannot_cancel_completed_reservation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let car = factory::create_car(db).await?;
    let reservation = ReservationFactory::new(db, car.id, user.id)
        .status("COMPLETED")
        .build()
        .await?;

    let result = ReservationService::new(db)
        .cancel(reservation.id, &user)
        .await;

    assert!(matches!(
        result,
        Err(AppError::ReservationErr(
            ReservationError::InvalidTransition { .. }
        ))
    ));

    Ok(())
}

/// Tests that other users cannot cancel, while admins can.
///
/// Expected: NotFound for a stranger, Ok for an admin
#[tokio::test]
async fn only_owner_or_admin_can_cancel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let owner = registered_user(db).await?;
    let stranger = registered_user(db).await?;
    let admin = admin_user(db).await?;
    let car = factory::create_car(db).await?;
    let reservation = factory::create_reservation(db, car.id, owner.id).await?;

    let service = ReservationService::new(db);

    assert!(matches!(
        service.cancel(reservation.id, &stranger).await,
        Err(AppError::NotFound(_))
    ));

    let cancelled = service.cancel(reservation.id, &admin).await?;
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    Ok(())
}
