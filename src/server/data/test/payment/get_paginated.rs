use super::*;

/// Tests paginating all payments.
///
/// Expected: Ok with per-page slices and the full total
#[tokio::test]
async fn paginates_payments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, reservation) =
        factory::helpers::create_reservation_with_dependencies(db).await?;
    for _ in 0..5 {
        factory::create_payment(db, reservation.id).await?;
    }

    let repo = PaymentRepository::new(db);
    let (first, total) = repo.get_paginated(0, 2).await?;
    let (last, _) = repo.get_paginated(2, 2).await?;

    assert_eq!(total, 5);
    assert_eq!(first.len(), 2);
    assert_eq!(last.len(), 1);

    Ok(())
}
