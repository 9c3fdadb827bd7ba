use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    util::token::hash_token,
};

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

/// Tests admin user successfully passes admin permission check.
///
/// Expected: Ok(User) with admin role
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = factory::user::create_admin(db).await?;
    factory::auth_token::AuthTokenFactory::new(db, admin.id)
        .token_hash(hash_token("admin-token"))
        .build()
        .await?;

    let headers = bearer("admin-token");
    let user = AuthGuard::new(db, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert!(user.is_admin());

    Ok(())
}

/// Tests non-admin user is denied admin permission.
///
/// Expected: Err(AuthError::AccessDenied) carrying the user id
#[tokio::test]
async fn denies_access_to_non_admin_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::auth_token::AuthTokenFactory::new(db, user.id)
        .token_hash(hash_token("user-token"))
        .build()
        .await?;

    let headers = bearer("user-token");
    let result = AuthGuard::new(db, &headers)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, _))) => {
            assert_eq!(user_id, user.id)
        }
        other => panic!("Expected AccessDenied, got {:?}", other),
    }

    Ok(())
}

/// Tests requests without an Authorization header.
///
/// Expected: MissingToken from `require`, anonymous from `optional`
#[tokio::test]
async fn handles_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = HeaderMap::new();
    let guard = AuthGuard::new(db, &headers);

    assert!(matches!(
        guard.require(&[]).await,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
    assert!(guard.optional().await?.is_none());

    Ok(())
}

/// Tests rejected tokens.
///
/// Verifies that expired tokens, unknown tokens and non-bearer schemes are refused even
/// on endpoints where authentication is optional.
///
/// Expected: Err(AuthError::InvalidToken) in every case
#[tokio::test]
async fn rejects_invalid_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let user = factory::create_user(db).await?;
    factory::auth_token::AuthTokenFactory::new(db, user.id)
        .token_hash(hash_token("stale-token"))
        .expires_at(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let mut basic = HeaderMap::new();
    basic.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    for headers in [bearer("stale-token"), bearer("never-issued"), basic] {
        assert!(matches!(
            AuthGuard::new(db, &headers).optional().await,
            Err(AppError::AuthErr(AuthError::InvalidToken))
        ));
    }

    Ok(())
}
