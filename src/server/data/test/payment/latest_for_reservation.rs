use super::*;

/// Tests that the latest attempt wins regardless of its outcome.
///
/// Expected: Ok(Some) with the most recently inserted payment
#[tokio::test]
async fn returns_most_recent_attempt() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, reservation) =
        factory::helpers::create_reservation_with_dependencies(db).await?;

    let repo = PaymentRepository::new(db);
    repo.create(params(reservation.id, PaymentOutcome::Failed))
        .await?;
    let last = repo
        .create(params(reservation.id, PaymentOutcome::Success))
        .await?;

    let latest = repo.latest_for_reservation(reservation.id).await?.unwrap();

    assert_eq!(latest.id, last.id);

    Ok(())
}

/// Tests a reservation without payments.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_payments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, reservation) =
        factory::helpers::create_reservation_with_dependencies(db).await?;

    let repo = PaymentRepository::new(db);

    assert!(repo.latest_for_reservation(reservation.id).await?.is_none());

    Ok(())
}
