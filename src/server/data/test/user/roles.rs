use super::*;

/// Tests promoting a user and detecting that an admin exists.
///
/// Expected: admin_exists false before, true after promotion
#[tokio::test]
async fn promotes_user_to_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    assert!(!repo.admin_exists().await?);

    let promoted = repo.set_role(user.id, Role::Admin).await?.unwrap();

    assert!(promoted.is_admin());
    assert!(repo.admin_exists().await?);

    Ok(())
}

/// Tests changing the role of a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.set_role(42, Role::Admin).await?.is_none());

    Ok(())
}
