use super::*;

/// Tests the caller's reservation listing by scope.
///
/// Expected: active scope holds PENDING/CONFIRMED, past scope COMPLETED/CANCELLED, cars attached
#[tokio::test]
async fn lists_my_reservations_by_scope() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = registered_user(db).await?;
    let other = registered_user(db).await?;
    let car = factory::create_car(db).await?;
    factory::create_reservation(db, car.id, user.id).await?;
    ReservationFactory::new(db, car.id, user.id)
        .status("COMPLETED")
        .build()
        .await?;
    factory::create_reservation(db, car.id, other.id).await?;

    let service = ReservationService::new(db);
    let active = service.my(user.id, ReservationScope::Active).await?;
    let past = service.my(user.id, ReservationScope::Past).await?;
    let all = service.my(user.id, ReservationScope::All).await?;

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].0.status, ReservationStatus::Pending);
    assert_eq!(active[0].1.as_ref().map(|c| c.id), Some(car.id));
    assert_eq!(past.len(), 1);
    assert_eq!(all.len(), 2);

    Ok(())
}

/// Tests that reservations of other users are hidden.
///
/// Expected: NotFound for a stranger, Ok for owner and admin
#[tokio::test]
async fn hides_reservations_of_other_users() -> Result<(), AppError> {
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
        service.get_visible(reservation.id, &stranger).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(
        service.get_visible(reservation.id, &owner).await?.id,
        reservation.id
    );
    let (_, car_of_reservation) = service.get_with_car(reservation.id, &admin).await?;
    assert_eq!(car_of_reservation.map(|c| c.id), Some(car.id));

    Ok(())
}
