use super::*;

/// Tests resolving a live token to its user.
///
/// Expected: Ok(Some) with the token owner
#[tokio::test]
async fn resolves_valid_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;

    let repo = AuthTokenRepository::new(db);
    repo.create(user.id, "digest".to_string(), Utc::now() + Duration::hours(1))
        .await?;

    let found = repo
        .find_user_by_valid_hash("digest", Utc::now())
        .await?
        .unwrap();

    assert_eq!(found.id, user.id);

    Ok(())
}

/// Tests that expired and unknown tokens do not resolve.
///
/// Expected: Ok(None) for both
#[tokio::test]
async fn ignores_expired_and_unknown_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::auth_token::AuthTokenFactory::new(db, user.id)
        .token_hash("stale")
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let repo = AuthTokenRepository::new(db);

    assert!(repo
        .find_user_by_valid_hash("stale", Utc::now())
        .await?
        .is_none());
    assert!(repo
        .find_user_by_valid_hash("unknown", Utc::now())
        .await?
        .is_none());

    Ok(())
}
