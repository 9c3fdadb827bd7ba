use super::*;

/// Tests claiming an existing car row.
///
/// Expected: Ok(true)
#[tokio::test]
async fn claims_existing_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let car = factory::create_car(db).await?;

    let repo = CarRepository::new(db);

    assert!(repo.claim(car.id).await?);

    Ok(())
}

/// Tests claiming a car that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_car() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarRepository::new(db);

    assert!(!repo.claim(999).await?);

    Ok(())
}

/// Tests changing the operational status of a car.
///
/// Expected: Ok(true) and the new status is persisted
#[tokio::test]
async fn sets_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Car)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let car = factory::create_car(db).await?;

    let repo = CarRepository::new(db);

    assert!(repo.set_status(car.id, CarStatus::Rented).await?);
    assert_eq!(
        repo.find_by_id(car.id).await?.unwrap().status,
        CarStatus::Rented
    );
    assert!(!repo.set_status(999, CarStatus::Rented).await?);

    Ok(())
}
