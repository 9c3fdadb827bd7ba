use super::*;

/// Tests replacing a car's fields.
///
/// Expected: Ok(Some) with the new values persisted
#[tokio::test]
async fn updates_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let car = factory::create_car(db).await?;

    let repo = CarRepository::new(db);
    let mut changes = params("NEW-1");
    changes.status = CarStatus::Maintenance;
    changes.price_per_day_cents = 31_000;

    let updated = repo.update(car.id, changes).await?.unwrap();

    assert_eq!(updated.id, car.id);
    assert_eq!(updated.registration_number, "NEW-1");
    assert_eq!(updated.status, CarStatus::Maintenance);
    assert_eq!(updated.price_per_day_cents, 31_000);

    Ok(())
}

/// Tests updating a car that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);

    assert!(repo.update(42, params("X-1")).await?.is_none());

    Ok(())
}

/// Tests deleting a car.
///
/// Expected: Ok(true) once, then Ok(false) and the car is gone
#[tokio::test]
async fn deletes_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let car = factory::create_car(db).await?;

    let repo = CarRepository::new(db);

    assert!(repo.delete(car.id).await?);
    assert!(!repo.delete(car.id).await?);
    assert!(repo.find_by_id(car.id).await?.is_none());

    Ok(())
}
