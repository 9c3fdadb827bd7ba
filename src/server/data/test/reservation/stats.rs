use super::*;

/// Tests counting reservations per status and summing paid totals.
///
/// Expected: Ok with per-status counts and the sum of PAID totals only
#[tokio::test]
async fn aggregates_counts_and_revenue() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    let car = factory::create_car(db).await?;

    ReservationFactory::new(db, car.id, user.id)
        .status("CONFIRMED")
        .payment_status("PAID")
        .total_price_cents(50_000)
        .build()
        .await?;
    ReservationFactory::new(db, car.id, user.id)
        .status("COMPLETED")
        .payment_status("PAID")
        .total_price_cents(20_000)
        .build()
        .await?;
    ReservationFactory::new(db, car.id, user.id)
        .status("CANCELLED")
        .payment_status("REFUNDED")
        .total_price_cents(99_000)
        .build()
        .await?;
    factory::create_reservation(db, car.id, user.id).await?;

    let repo = ReservationRepository::new(db);
    let stats = repo.count_by_status().await?;
    let revenue = repo.sum_paid_totals().await?;

    assert_eq!(stats.pending, 1);
    assert_eq!(stats.confirmed, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(stats.total(), 4);
    assert_eq!(revenue, 70_000);

    Ok(())
}

/// Tests aggregates on an empty table.
///
/// Expected: Ok with zero counts and zero revenue
#[tokio::test]
async fn returns_zero_without_reservations() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReservationRepository::new(db);

    assert_eq!(repo.count_by_status().await?.total(), 0);
    assert_eq!(repo.sum_paid_totals().await?, 0);

    Ok(())
}
