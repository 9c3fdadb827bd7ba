use super::*;

/// Tests creating a car.
///
/// Verifies that every field is persisted and the status round-trips as an enum.
///
/// Expected: Ok with the created car
#[tokio::test]
async fn creates_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);
    let car = repo.create(params("AA-1")).await?;

    assert_eq!(car.brand, "Peugeot");
    assert_eq!(car.registration_number, "AA-1");
    assert_eq!(car.status, CarStatus::Available);
    assert_eq!(car.price_per_day_cents, 28_000);

    let found = repo.find_by_id(car.id).await?.unwrap();
    assert_eq!(found.registration_number, car.registration_number);

    Ok(())
}

/// Tests creating two cars with the same registration number.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_registration() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);
    repo.create(params("DUP-1")).await?;

    let result = repo.create(params("DUP-1")).await;

    match result {
        Err(AppError::DbErr(err)) => assert!(crate::server::error::is_unique_violation(&err)),
        other => panic!("expected unique violation, got {:?}", other),
    }

    Ok(())
}
