use super::*;

/// Tests creating a user and finding it by email.
///
/// Expected: Ok with the same user returned by `find_by_email` and `find_by_id`
#[tokio::test]
async fn creates_and_finds_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(new_user("nadia@example.com")).await?;

    assert!(user.is_registered());
    assert_eq!(user.role, Role::User);

    let by_email = repo.find_by_email("nadia@example.com").await?.unwrap();
    let by_id = repo.find_by_id(user.id).await?.unwrap();

    assert_eq!(by_email.id, user.id);
    assert_eq!(by_id.email, "nadia@example.com");
    assert!(repo.find_by_email("missing@example.com").await?.is_none());

    Ok(())
}

/// Tests that emails are unique.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(new_user("dup@example.com")).await?;
    let result = repo.create(new_user("dup@example.com")).await;

    assert!(matches!(
        result,
        Err(AppError::DbErr(ref err)) if crate::server::error::is_unique_violation(err)
    ));

    Ok(())
}
