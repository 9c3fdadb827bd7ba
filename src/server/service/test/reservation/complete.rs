use super::*;

/// Tests an admin completing a confirmed rental.
///
/// Expected: COMPLETED and the rented car back to AVAILABLE
#[tokio::test]
async fn admin_completes_confirmed_rental() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = admin_user(db).await?;
    let user = registered_user(db).await?;
    let car = factory::car::CarFactory::new(db)
        .status("RENTED")
        .build()
        .await?;
    let reservation = ReservationFactory::new(db, car.id, user.id)
        .dates(days_from_today(-3), days_from_today(0))
        .status("CONFIRMED")
        .payment_status("PAID")
        .build()
        .await?;

    let completed = ReservationService::new(db)
        .complete(reservation.id, &admin)
        .await?;

    assert_eq!(completed.status, ReservationStatus::Completed);
    assert_eq!(completed.payment_status, PaymentStatus::Paid);

    let car = CarRepository::new(db).find_by_id(car.id).await?.unwrap();
    assert_eq!(car.status, CarStatus::Available);

    Ok(())
}

/// Tests completion rules.
///
/// Verifies that owners may not complete and that PENDING reservations cannot complete.
///
/// Expected: AccessDenied for the owner, InvalidTransition for the admin
#[tokio::test]
async fn completion_requires_admin_and_confirmed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = admin_user(db).await?;
    let owner = registered_user(db).await?;
    let car = factory::create_car(db).await?;
    let reservation = factory::create_reservation(db, car.id, owner.id).await?;

    let service = ReservationService::new(db);

    assert!(matches!(
        service.complete(reservation.id, &owner).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));
    assert!(matches!(
        service.complete(reservation.id, &admin).await,
        Err(AppError::ReservationErr(
            ReservationError::InvalidTransition { .. }
        ))
    ));

    Ok(())
}
