use super::*;

/// Tests recording a payment attempt.
///
/// Expected: Ok with the payment readable by id and listed for its reservation
#[tokio::test]
async fn records_payment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_rental_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let (_, _, reservation) =
        factory::helpers::create_reservation_with_dependencies(db).await?;

    let repo = PaymentRepository::new(db);
    let payment = repo
        .create(params(reservation.id, PaymentOutcome::Success))
        .await?;

    assert_eq!(payment.reservation_id, reservation.id);
    assert_eq!(payment.status, PaymentOutcome::Success);
    assert_eq!(payment.method, "CARD");

    let found = repo.find_by_id(payment.id).await?.unwrap();
    assert_eq!(found.transaction_id, payment.transaction_id);

    let listed = repo.get_by_reservation(reservation.id).await?;
    assert_eq!(listed.len(), 1);

    Ok(())
}
