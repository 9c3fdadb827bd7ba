use super::*;

/// Tests deleting a single token by digest.
///
/// Expected: true for the first delete, false for the second
#[tokio::test]
async fn deletes_token_by_hash() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::auth_token::AuthTokenFactory::new(db, user.id)
        .token_hash("logout-me")
        .build()
        .await?;

    let repo = AuthTokenRepository::new(db);

    assert!(repo.delete_by_hash("logout-me").await?);
    assert!(!repo.delete_by_hash("logout-me").await?);

    Ok(())
}

/// Tests purging expired tokens while keeping live ones.
///
/// Expected: Ok(2) and the live token still resolves
#[tokio::test]
async fn purges_only_expired_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    for _ in 0..2 {
        factory::auth_token::AuthTokenFactory::new(db, user.id)
            .expires_at(Utc::now() - Duration::hours(1))
            .build()
            .await?;
    }
    factory::auth_token::AuthTokenFactory::new(db, user.id)
        .token_hash("live")
        .build()
        .await?;

    let repo = AuthTokenRepository::new(db);
    let removed = repo.delete_expired(Utc::now()).await?;

    assert_eq!(removed, 2);
    assert!(repo
        .find_user_by_valid_hash("live", Utc::now())
        .await?
        .is_some());

    Ok(())
}
